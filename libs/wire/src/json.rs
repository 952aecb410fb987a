//! JSON field encodings matching protobuf JSON conventions.
//!
//! Protobuf's canonical JSON mapping renders `bytes` fields as base64
//! strings and enum fields by their declared names. The serde derives on
//! the wire messages delegate those fields to the helper modules here so
//! the JSON encoding stays interchangeable with the binary one.

/// `bytes` fields as base64 strings.
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// `repeated bytes` fields as arrays of base64 strings.
pub(crate) mod base64_bytes_list {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(list: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(list.iter().map(|bytes| STANDARD.encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Declares a serde helper module for an `i32` enumeration field, mapping
/// values to their protobuf enum names in JSON.
macro_rules! enum_name_serde {
    ($module:ident, $enum:ty) => {
        pub(crate) mod $module {
            use serde::{Deserialize, Deserializer, Serializer};

            pub fn serialize<S: Serializer>(
                value: &i32,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                let variant = <$enum>::try_from(*value).map_err(|_| {
                    serde::ser::Error::custom(format!(
                        "unknown {} value: {value}",
                        stringify!($enum)
                    ))
                })?;
                serializer.serialize_str(variant.as_str_name())
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<i32, D::Error> {
                let name = String::deserialize(deserializer)?;
                <$enum>::from_str_name(&name)
                    .map(|variant| variant as i32)
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "unknown {} name: {name}",
                            stringify!($enum)
                        ))
                    })
            }
        }
    };
}

enum_name_serde!(call_type, crate::call::CallType);
enum_name_serde!(event_type, crate::event::EventType);
enum_name_serde!(publish_status, crate::call::PublishStatus);
enum_name_serde!(operation_state, crate::resource::OperationState);
