use std::{fmt, num::ParseIntError, str::FromStr};

/// Numeric row identifiers as assigned by the database.
pub type IdValue = i64;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(IdValue);

        impl $name {
            pub const fn new(value: IdValue) -> Self {
                Self(value)
            }

            pub const fn value(self) -> IdValue {
                self.0
            }
        }

        impl From<IdValue> for $name {
            fn from(from: IdValue) -> Self {
                Self(from)
            }
        }

        impl From<$name> for IdValue {
            fn from(from: $name) -> Self {
                from.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Identifies a [`User`](crate::user::User).
    UserId
);

row_id!(
    /// Identifies a [`Campaign`](crate::campaign::Campaign).
    CampaignId
);

row_id!(ContributionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: CampaignId = " 42".parse().unwrap();
        assert_eq!(CampaignId::new(42), id);
        assert_eq!("42", id.to_string());
        assert!("x".parse::<UserId>().is_err());
    }
}
