//! Equipment компоненты: Weapon, Loadout
//!
//! **Loadout**: оружие в руках + общая свалка inventory.
//! Launcher (лук, арбалет) хранит собственный счётчик боеприпасов.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WeaponKind {
    Melee,
    /// Missile launcher (требует ammo)
    Launcher,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    /// Дистанция атаки этим оружием (метры)
    pub range: f32,
    /// Боеприпасы (только для Launcher)
    pub ammo: u32,
}

impl Weapon {
    pub fn melee(name: impl Into<String>, range: f32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Melee,
            range,
            ammo: 0,
        }
    }

    pub fn launcher(name: impl Into<String>, range: f32, ammo: u32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Launcher,
            range,
            ammo,
        }
    }

    pub fn is_launcher(&self) -> bool {
        self.kind == WeaponKind::Launcher
    }

    pub fn has_ammo(&self) -> bool {
        self.is_launcher() && self.ammo > 0
    }
}

/// Экипировка существа
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Loadout {
    /// Оружие в руках (None = без оружия)
    pub equipped: Option<Weapon>,
    /// Всё остальное
    pub inventory: Vec<Weapon>,
}

impl Loadout {
    pub fn equipped_launcher(&self) -> Option<&Weapon> {
        self.equipped.as_ref().filter(|w| w.is_launcher())
    }

    /// Есть ли launcher с ammo (в руках или в inventory)
    pub fn missile_available(&self) -> bool {
        self.equipped.iter().chain(self.inventory.iter()).any(Weapon::has_ammo)
    }

    /// Убрать оружие из рук обратно в inventory
    pub fn unequip(&mut self) {
        if let Some(weapon) = self.equipped.take() {
            self.inventory.push(weapon);
        }
    }

    /// Экипировать лучшее оружие из inventory.
    ///
    /// prefer_missile: сначала launcher с ammo, потом melee.
    /// Иначе: только melee. Возвращает true если что-то экипировано.
    pub fn equip_from_inventory(&mut self, prefer_missile: bool) -> bool {
        let launcher = if prefer_missile {
            self.inventory.iter().position(Weapon::has_ammo)
        } else {
            None
        };
        let index = launcher.or_else(|| self.inventory.iter().position(|w| w.kind == WeaponKind::Melee));

        let Some(index) = index else {
            return false;
        };

        self.unequip();
        let weapon = self.inventory.remove(index);
        self.equipped = Some(weapon);
        true
    }

    /// Сменить launcher на melee оружие (или голые руки)
    pub fn switch_to_melee(&mut self) {
        if self.equipped_launcher().is_some() {
            self.unequip();
        }
        if self.equipped.is_none() {
            self.equip_from_inventory(false);
        }
    }
}
