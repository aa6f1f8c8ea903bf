use std::fmt;

/// Company name exactly as submitted. It is the job key: it is not trimmed,
/// case-folded or otherwise normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidCompanyName> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidCompanyName);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Alphanumeric characters only, for use in file names.
    pub fn sanitized(&self) -> String {
        self.0.chars().filter(|c| c.is_alphanumeric()).collect()
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("company name must not be blank")]
pub struct InvalidCompanyName;
