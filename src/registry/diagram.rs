//! Survey diagram derivation.
//!
//! The diagram registry is not queried independently: a diagram reference
//! is synthesized from the cadastral record's SG parcel key, together with
//! a deep link into the public Surveyor General viewer. Without a key the
//! diagram is simply unavailable.

use crate::types::{CadastralRecord, SurveyDiagram};

/// Derive a survey diagram reference from an already-fetched cadastral
/// record. Returns `None` when the record carries no SG/parcel key.
pub fn diagram_from_cadastral(
    cadastral: Option<&CadastralRecord>,
    viewer_url: &str,
) -> Option<SurveyDiagram> {
    let record = cadastral?;
    let code = record.sg_code.as_deref().or(record.parcel_key.as_deref())?;

    // Char-wise truncation: parcel keys are upstream strings and are not
    // guaranteed to be ASCII.
    let short: String = code.chars().take(20).collect();
    Some(SurveyDiagram {
        sg_number: format!("SG {short}"),
        sg_code: Some(code.to_string()),
        download_link: format!("{viewer_url}?prclkey={code}"),
        farm_name: record.farm_name.clone(),
        erf: record.erf_number.clone(),
        township: record.township.clone(),
        portion: record.portion.clone(),
        extent_ha: record.extent_sqm.map(|sqm| sqm / 10_000.0),
    })
}
