//! Global logger для AI симуляции
//!
//! Один process-wide `LogPrinter` (console по умолчанию, host может подменить своим).
//! AI тикает десятки существ за кадр и пишет debug строку почти на каждой ветке,
//! поэтому:
//! - `LOGGER_LEVEL` реально фильтрует: сообщения ниже уровня отбрасываются до
//!   форматирования timestamp
//! - уровни упорядочены через derive, без ручного `as_int`
//! - poisoned mutex (паника в чужом printer'е) не роняет симуляцию: берём данные как есть

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Printer = Box<dyn LogPrinter>;

static LOGGER: Lazy<Mutex<Option<Printer>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_logger(logger: Printer) {
    *lock(&LOGGER) = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *lock(&LOGGER_LEVEL) = level;
}

/// Ставит printer, только если host ещё не поставил свой
pub fn set_logger_if_needed(logger: Printer) {
    lock(&LOGGER).get_or_insert(logger);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn enabled(self) -> bool {
        self >= *lock(&LOGGER_LEVEL)
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Debug: ветки AI тика, intents
pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if !level.enabled() {
        return;
    }

    if let Some(printer) = lock(&LOGGER).as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        printer.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// stdout printer для headless запуска
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
