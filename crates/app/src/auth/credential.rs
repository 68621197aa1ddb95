//! Credential structural parsing.
//!
//! A bearer credential is exactly three non-empty dot-separated segments.
//! Only the shape is checked here; cryptographic validity belongs to the
//! credential verifier.

use thiserror::Error;

/// Number of dot-separated segments in a well-formed credential.
pub const CREDENTIAL_SEGMENTS: usize = 3;

/// Borrowed view of a structurally valid credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCredential<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

#[derive(Debug, Error)]
#[error("credential is not three dot-separated segments")]
pub struct CredentialFormatError;

/// Check the three-segment shape without keeping the parts.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    parse_credential(token).is_ok()
}

pub fn parse_credential(token: &str) -> Result<ParsedCredential<'_>, CredentialFormatError> {
    let mut segments = token.split('.');

    let header = segments.next().ok_or(CredentialFormatError)?;
    let payload = segments.next().ok_or(CredentialFormatError)?;
    let signature = segments.next().ok_or(CredentialFormatError)?;

    if segments.next().is_some() {
        return Err(CredentialFormatError);
    }

    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(CredentialFormatError);
    }

    Ok(ParsedCredential {
        header,
        payload,
        signature,
    })
}
