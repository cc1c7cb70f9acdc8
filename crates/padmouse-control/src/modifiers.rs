use crate::key::Key;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Modifier {
    Ctrl,
    Super,
    Shift,
    Alt,
}

impl Modifier {
    pub const CTRL: u8 = 1 << 0;
    pub const SUPER: u8 = 1 << 1;
    pub const SHIFT: u8 = 1 << 2;
    pub const ALT: u8 = 1 << 3;

    /// Modifiers in the order they are pressed.
    pub const ALL: [Modifier; 4] = [Modifier::Super, Modifier::Ctrl, Modifier::Shift, Modifier::Alt];

    pub const fn to_bitmap(&self) -> u8 {
        match self {
            Modifier::Ctrl => Self::CTRL,
            Modifier::Super => Self::SUPER,
            Modifier::Shift => Self::SHIFT,
            Modifier::Alt => Self::ALT,
        }
    }

    pub const fn key(&self) -> Key {
        match self {
            Modifier::Ctrl => Key::Control,
            Modifier::Super => Key::Meta,
            Modifier::Shift => Key::Shift,
            Modifier::Alt => Key::Alt,
        }
    }
}

impl TryFrom<Key> for Modifier {
    type Error = Key;

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        match key {
            Key::Control => Ok(Modifier::Ctrl),
            Key::Meta => Ok(Modifier::Super),
            Key::Shift => Ok(Modifier::Shift),
            Key::Alt => Ok(Modifier::Alt),
            other => Err(other),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_values(values: &[Modifier]) -> Self {
        let mut modifiers = Self::empty();
        let mut i = 0;
        while i < values.len() {
            modifiers.add(values[i]);
            i += 1;
        }
        modifiers
    }

    pub const fn add(&mut self, modifier: Modifier) {
        self.0 |= modifier.to_bitmap();
    }

    pub const fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.to_bitmap() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set modifiers in press order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_from_key() {
        assert_eq!(Modifier::try_from(Key::Control), Ok(Modifier::Ctrl));
        assert_eq!(Modifier::try_from(Key::Meta), Ok(Modifier::Super));
        assert_eq!(Modifier::try_from(Key::Escape), Err(Key::Escape));
        for m in Modifier::ALL {
            assert_eq!(Modifier::try_from(m.key()), Ok(m));
        }
    }

    #[test]
    fn test_modifiers_add_and_contains() {
        let mut mods = Modifiers::empty();
        assert!(mods.is_empty());
        mods.add(Modifier::Ctrl);
        assert!(mods.contains(Modifier::Ctrl));
        assert!(!mods.contains(Modifier::Alt));
    }

    #[test]
    fn test_modifiers_from_values_deduplicates() {
        let mods = Modifiers::from_values(&[Modifier::Ctrl, Modifier::Alt, Modifier::Ctrl]);
        assert_eq!(mods.iter().count(), 2);
        assert!(mods.contains(Modifier::Ctrl));
        assert!(mods.contains(Modifier::Alt));
    }

    #[test]
    fn test_iter_follows_press_order() {
        let mods = Modifiers::from_values(&[Modifier::Alt, Modifier::Ctrl, Modifier::Super]);
        let order: Vec<_> = mods.iter().collect();
        assert_eq!(order, vec![Modifier::Super, Modifier::Ctrl, Modifier::Alt]);
        let reversed: Vec<_> = mods.iter().rev().collect();
        assert_eq!(reversed, vec![Modifier::Alt, Modifier::Ctrl, Modifier::Super]);
    }
}
