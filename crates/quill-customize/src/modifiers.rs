use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::CustomizationError;

/// Java declaration modifiers, with the bit values of `java.lang.reflect.Modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(0x001);
    pub const PRIVATE: Self = Self(0x002);
    pub const PROTECTED: Self = Self(0x004);
    pub const STATIC: Self = Self(0x008);
    pub const FINAL: Self = Self(0x010);
    pub const SYNCHRONIZED: Self = Self(0x020);
    pub const VOLATILE: Self = Self(0x040);
    pub const TRANSIENT: Self = Self(0x080);
    pub const NATIVE: Self = Self(0x100);
    pub const INTERFACE: Self = Self(0x200);
    pub const ABSTRACT: Self = Self(0x400);
    pub const STRICT: Self = Self(0x800);

    const ACCESS: u32 = 0x001 | 0x002 | 0x004;

    /// Rendering order used by `Modifier.toString`.
    const KEYWORDS: [(Modifiers, &'static str); 11] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::ABSTRACT, "abstract"),
        (Self::STATIC, "static"),
        (Self::FINAL, "final"),
        (Self::TRANSIENT, "transient"),
        (Self::VOLATILE, "volatile"),
        (Self::SYNCHRONIZED, "synchronized"),
        (Self::NATIVE, "native"),
        (Self::STRICT, "strictfp"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn keyword(word: &str) -> Option<Modifiers> {
        Self::KEYWORDS
            .iter()
            .find(|(_, keyword)| *keyword == word)
            .map(|(modifier, _)| *modifier)
    }

    /// Builds a set from keywords such as `["public", "static"]`.
    pub fn from_keywords<I, S>(words: I) -> Result<Modifiers, CustomizationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Modifiers::NONE;
        for word in words {
            let word = word.as_ref();
            out |= Self::keyword(word).ok_or_else(|| {
                CustomizationError::InvalidArgument(format!("unknown modifier {word:?}"))
            })?;
        }
        Ok(out)
    }

    /// Checks that every bit is allowed on `kind` and that at most one access modifier is set.
    pub fn validate(self, kind: DeclarationKind) -> Result<(), CustomizationError> {
        if self.0 & !kind.allowed().0 != 0 {
            return Err(CustomizationError::InvalidArgument(format!(
                "modifiers {:?} contain illegal modifiers for a {}",
                self.to_string(),
                kind.describe()
            )));
        }
        if (self.0 & Self::ACCESS).count_ones() > 1 {
            return Err(CustomizationError::InvalidArgument(format!(
                "modifiers {:?} contain more than one access modifier",
                self.to_string()
            )));
        }
        Ok(())
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (modifier, keyword) in Self::KEYWORDS {
            if self.contains(modifier) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(keyword)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for Modifiers {
    type Err = CustomizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifiers::from_keywords(s.split_whitespace())
    }
}

/// What a modifier set is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Interface,
    Method,
    Constructor,
    Field,
}

impl DeclarationKind {
    pub fn allowed(self) -> Modifiers {
        use Modifiers as M;
        match self {
            DeclarationKind::Class => {
                M::PUBLIC
                    | M::PROTECTED
                    | M::PRIVATE
                    | M::ABSTRACT
                    | M::STATIC
                    | M::FINAL
                    | M::STRICT
            }
            DeclarationKind::Interface => {
                M::PUBLIC | M::PROTECTED | M::PRIVATE | M::ABSTRACT | M::STATIC | M::STRICT
            }
            DeclarationKind::Method => {
                M::PUBLIC
                    | M::PROTECTED
                    | M::PRIVATE
                    | M::ABSTRACT
                    | M::STATIC
                    | M::FINAL
                    | M::SYNCHRONIZED
                    | M::NATIVE
                    | M::STRICT
            }
            DeclarationKind::Constructor => M::PUBLIC | M::PROTECTED | M::PRIVATE,
            DeclarationKind::Field => {
                M::PUBLIC
                    | M::PROTECTED
                    | M::PRIVATE
                    | M::STATIC
                    | M::FINAL
                    | M::TRANSIENT
                    | M::VOLATILE
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Method => "method",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Field => "field",
        }
    }
}
