//! Domain entity representing one requested community update.

use csv::StringRecord;

use crate::error::InputError;

const DOMAIN_NAME: (usize, &str) = (0, "domain name");
const DESCRIPTION: (usize, &str) = (1, "description");
const SHORT_DESCRIPTION: (usize, &str) = (2, "short description");

/// A single row of input: the new short description for one community.
///
/// Built from exactly one input row, consumed by exactly one update call.
/// `description` is carried for positional fidelity with existing files and is
/// not written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityUpdate {
    /// Match key for the update.
    pub domain_name: String,
    pub description: String,
    /// New value for `ShortDescription`.
    pub short_description: String,
}

impl CommunityUpdate {
    pub fn new(
        domain_name: impl Into<String>,
        description: impl Into<String>,
        short_description: impl Into<String>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            description: description.into(),
            short_description: short_description.into(),
        }
    }

    /// Maps a CSV record positionally: `[domain name, description, short description]`.
    ///
    /// Fields after the third are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingField`] if the record has fewer than three fields.
    pub fn from_record(record: &StringRecord) -> Result<Self, InputError> {
        let field = |(index, name): (usize, &'static str)| {
            record
                .get(index)
                .ok_or_else(|| InputError::MissingField {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    index,
                    name,
                })
        };

        Ok(Self::new(
            field(DOMAIN_NAME)?,
            field(DESCRIPTION)?,
            field(SHORT_DESCRIPTION)?,
        ))
    }
}
