// src/models.rs

// Enums persistidos como TEXT (cada prédio tem o próprio schema, então
// evitamos tipos ENUM do Postgres por schema). O FromRow lê via
// `#[sqlx(try_from = "String")]` e os repositórios gravam com `as_str()`.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::common::error::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $( $text => Ok($name::$variant), )+
                    _ => Err(crate::common::error::AppError::InvalidEnumValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::common::error::AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for crate::models::listing::FieldValue {
            fn from(value: $name) -> Self {
                crate::models::listing::FieldValue::Text(value.as_str().to_string())
            }
        }
    };
}

pub mod listing;
pub mod auth;
pub mod building;
pub mod apartment;
pub mod resident;
pub mod bill;
pub mod payment;
pub mod service_request;
pub mod dashboard;

#[cfg(test)]
mod tests {
    use crate::common::error::AppError;
    use crate::models::{apartment::ApartmentStatus, service_request::ServiceRequestStatus};

    #[test]
    fn text_enums_round_trip_through_database_text() {
        for status in ApartmentStatus::ALL {
            let parsed: ApartmentStatus = status.as_str().parse().unwrap();
            assert_eq!(&parsed, status);
        }
        assert_eq!(
            ServiceRequestStatus::try_from("IN_PROGRESS".to_string()).unwrap(),
            ServiceRequestStatus::InProgress
        );
    }

    #[test]
    fn unknown_text_names_the_field() {
        let err = "DEMOLISHED".parse::<ApartmentStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidEnumValue { field: "status", .. }));
    }

    #[test]
    fn json_uses_database_spelling() {
        let json = serde_json::to_string(&ServiceRequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
