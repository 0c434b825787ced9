//! SIMBAD name resolution through the CDS Sesame XML interface.
//!
//! Sesame answers with one `<Resolver>` block per database. Only the first
//! block carrying a position is used; identifiers are cleaned of SIMBAD's
//! catalogue-type prefixes so they compare equal to how names are stored.

use astro_core::errors::ExternalError;
use astro_core::services::{NameResolver, ResolvedObject};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::RemoteError;
use crate::http::check_response;
use crate::RemoteClient;

const SERVICE: &str = "SIMBAD";

/// Prefixes SIMBAD puts in front of identifiers to mark the object type.
const PREFIXES: [&str; 4] = ["NAME ", "V* ", "** ", "* "];

/// Strip the object-type prefix and collapse runs of whitespace.
#[must_use]
pub fn clean_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Default)]
struct Parsed {
    oname: Option<String>,
    ra_deg: Option<f64>,
    dec_deg: Option<f64>,
    aliases: Vec<String>,
}

fn parse_degrees(field: &str, text: &str) -> Result<f64, RemoteError> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| RemoteError::Parse(format!("{field} {text:?}: {e}")))
}

/// Parse a Sesame XML document. `Ok(None)` when no resolver knew the name.
pub fn parse_sesame(xml: &str) -> Result<Option<ResolvedObject>, RemoteError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = Parsed::default();
    let mut current: Vec<u8> = Vec::new();
    let mut resolvers_done = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => current = e.name().as_ref().to_vec(),
            Event::End(e) => {
                // Later resolvers (NED, VizieR) may disagree; keep the first answer.
                if e.name().as_ref() == b"Resolver" && parsed.ra_deg.is_some() {
                    resolvers_done = true;
                }
                current.clear();
            }
            Event::Text(t) if !resolvers_done => {
                let text = t.unescape()?;
                match current.as_slice() {
                    b"oname" => parsed.oname = Some(clean_identifier(&text)),
                    b"jradeg" => parsed.ra_deg = Some(parse_degrees("jradeg", &text)?),
                    b"jdedeg" => parsed.dec_deg = Some(parse_degrees("jdedeg", &text)?),
                    b"alias" => parsed.aliases.push(clean_identifier(&text)),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match parsed {
        Parsed {
            oname: Some(main_id),
            ra_deg: Some(ra_deg),
            dec_deg: Some(dec_deg),
            aliases,
        } => Ok(Some(ResolvedObject {
            main_id,
            ra_deg,
            dec_deg,
            identifiers: aliases,
        })),
        _ => Ok(None),
    }
}

impl RemoteClient {
    async fn sesame(&self, name: &str) -> Result<Option<ResolvedObject>, RemoteError> {
        let url = format!("{}?{}", self.simbad.sesame_url, urlencoding::encode(name));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        parse_sesame(&body)
    }
}

impl NameResolver for RemoteClient {
    async fn resolve(&self, name: &str) -> Result<Option<ResolvedObject>, ExternalError> {
        if !self.simbad.enabled {
            return Ok(None);
        }
        let resolved = self
            .sesame(name)
            .await
            .map_err(|e| e.into_external(SERVICE))?;
        match &resolved {
            Some(object) => tracing::debug!(
                name,
                main_id = %object.main_id,
                identifiers = object.identifiers.len(),
                "resolved by SIMBAD"
            ),
            None => tracing::debug!(name, "unknown to SIMBAD"),
        }
        Ok(resolved)
    }
}
