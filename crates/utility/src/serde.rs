pub mod date {
    use core::fmt;

    use chrono::NaiveDate;
    use serde::{
        de::{self, Unexpected, Visitor},
        Deserializer, Serializer,
    };

    pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Parses a calendar date in the strict `YYYY-MM-DD` form.
    ///
    /// chrono accepts unpadded months and days (`2024-9-1`), which is rejected
    /// here so that every accepted input round-trips to the same string.
    pub fn parse_iso(value: &str) -> Option<NaiveDate> {
        if value.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
    }

    pub fn serialize<S>(
        date: &NaiveDate,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(ISO_DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl<'de> Visitor<'de> for DateVisitor {
            type Value = NaiveDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string in the format YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<NaiveDate, E>
            where
                E: de::Error,
            {
                parse_iso(value).ok_or_else(|| {
                    de::Error::invalid_value(Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper(#[serde(with = "super")] NaiveDate);

        #[test]
        fn parses_only_padded_dates() {
            assert_eq!(
                parse_iso("2024-09-18"),
                NaiveDate::from_ymd_opt(2024, 9, 18)
            );
            assert_eq!(parse_iso("2024-9-18"), None);
            assert_eq!(parse_iso("2024-02-30"), None);
            assert_eq!(parse_iso("18-09-2024"), None);
            assert_eq!(parse_iso(""), None);
        }

        #[test]
        fn serializes_as_iso_string() {
            let date = NaiveDate::from_ymd_opt(2020, 10, 15).unwrap();
            let json = serde_json::to_string(&Wrapper(date)).unwrap();
            assert_eq!(json, "\"2020-10-15\"");
            let back: Wrapper = serde_json::from_str(&json).unwrap();
            assert_eq!(back.0, date);
        }
    }
}
