//! Tick Scheduler / Desync Assigner
//!
//! Каждое существо тикает с одним и тем же интервалом, но со своей фазой:
//! `next_tick_time = now + tick_interval + desync`. Desync сэмплируется один раз
//! на первом тике из `[0, 2 × tick_interval)` и больше не меняется: иначе все
//! существа, заспавненные в одном кадре, тикали бы в одном кадре всегда.

use bevy::prelude::*;
use rand::Rng;

/// Расписание AI тиков одного существа
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct TickSchedule {
    /// None = ещё не назначен (до первого тика)
    desync: Option<f64>,
    next_tick_time: f64,
}

impl TickSchedule {
    pub fn desync_offset(&self) -> Option<f64> {
        self.desync
    }

    pub fn next_tick_time(&self) -> f64 {
        self.next_tick_time
    }

    /// Driver вызывает tick только когда `now >= next_tick_time`
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_tick_time
    }

    /// Назначает desync (один раз за жизнь) и вычисляет следующее время тика.
    pub fn schedule_next<R: Rng + ?Sized>(&mut self, now: f64, tick_interval: f64, rng: &mut R) -> f64 {
        let span = 2.0 * tick_interval;
        let desync = *self.desync.get_or_insert_with(|| {
            if span.is_finite() && span > 0.0 {
                rng.gen_range(0.0..span)
            } else {
                0.0
            }
        });

        // Monotonic даже если driver опоздал с часами
        self.next_tick_time = self.next_tick_time.max(now + tick_interval + desync);
        self.next_tick_time
    }
}

/// Отдельные часы для редких проверок (missed home), не привязанные к частоте AI тика
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct CheckClock {
    next_check_time: f64,
}

impl CheckClock {
    /// true если проверка должна выполниться сейчас (и сдвигает часы)
    pub fn take_due(&mut self, now: f64, interval: f64) -> bool {
        if now < self.next_check_time {
            return false;
        }
        self.next_check_time = now + interval;
        true
    }
}
