//! SVO Filter Profile Service client.
//!
//! The service answers with a VOTable whose `PARAM` elements carry the filter
//! properties. Wavelengths must come back in angstroms.

use std::collections::HashMap;

use astro_core::errors::ExternalError;
use astro_core::services::{FilterProfile, FilterProfileSource};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::RemoteError;
use crate::http::check_response;
use crate::RemoteClient;

const SERVICE: &str = "SVO";
const ANGSTROM_UNITS: [&str; 3] = ["Angstrom", "AA", "angstrom"];

#[derive(Debug, Default)]
struct Param {
    value: String,
    unit: Option<String>,
}

fn read_param(element: &BytesStart<'_>) -> Result<Option<(String, Param)>, RemoteError> {
    let mut name = None;
    let mut param = Param::default();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| RemoteError::Parse(e.to_string()))?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"value" => param.value = value,
            b"unit" => param.unit = Some(value),
            _ => {}
        }
    }
    Ok(name.map(|name| (name, param)))
}

fn collect_params(xml: &str) -> Result<HashMap<String, Param>, RemoteError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut params = HashMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"PARAM" => {
                if let Some((name, param)) = read_param(&e)? {
                    params.insert(name, param);
                }
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"INFO" => {
                let failed = read_param(&e)?
                    .is_some_and(|(name, param)| name == "QUERY_STATUS" && param.value == "ERROR");
                if failed {
                    return Err(RemoteError::NotFound("filter".into()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(params)
}

fn angstroms(params: &HashMap<String, Param>, name: &str) -> Result<Option<f64>, RemoteError> {
    let Some(param) = params.get(name) else {
        return Ok(None);
    };
    if let Some(unit) = param.unit.as_deref().filter(|u| !ANGSTROM_UNITS.contains(u)) {
        return Err(RemoteError::Unit {
            quantity: name.to_string(),
            unit: unit.to_string(),
        });
    }
    param
        .value
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| RemoteError::Parse(format!("{name} {:?}: {e}", param.value)))
}

/// Parse a filter VOTable. An empty table means the service has no such filter.
pub fn parse_votable(xml: &str, filter_id: &str) -> Result<FilterProfile, RemoteError> {
    let params = collect_params(xml)?;
    let missing = || RemoteError::NotFound(filter_id.to_string());
    let effective = angstroms(&params, "WavelengthEff")?.ok_or_else(missing)?;
    let width = angstroms(&params, "WidthEff")?.ok_or_else(missing)?;
    Ok(FilterProfile {
        filter_id: params
            .get("filterID")
            .map_or_else(|| filter_id.to_string(), |p| p.value.clone()),
        effective_wavelength_angstroms: effective,
        fwhm_angstroms: angstroms(&params, "FWHM")?,
        width_effective_angstroms: width,
    })
}

impl RemoteClient {
    async fn filter_votable(&self, filter_id: &str) -> Result<FilterProfile, RemoteError> {
        let url = format!("{}?ID={}", self.svo.base_url, urlencoding::encode(filter_id));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        parse_votable(&resp.text().await?, filter_id)
    }
}

impl FilterProfileSource for RemoteClient {
    async fn fetch(
        &self,
        telescope: &str,
        instrument: &str,
        filter: &str,
    ) -> Result<FilterProfile, ExternalError> {
        let filter_id = format!("{telescope}/{instrument}.{filter}");
        let profile = self
            .filter_votable(&filter_id)
            .await
            .map_err(|e| e.into_external(SERVICE))?;
        tracing::debug!(
            filter_id,
            wavelength = profile.effective_wavelength_angstroms,
            width = profile.width_effective_angstroms,
            "filter profile fetched"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"<?xml version="1.0"?>
<VOTABLE version="1.1" xmlns="http://www.ivoa.net/xml/VOTable/v1.1">
  <RESOURCE type="results">
    <TABLE utype="photdm:PhotometryFilter.transmissionCurve.spectrum">
      <PARAM name="FilterProfileService" value="ivo://svo/fps" ucd="meta.ref.ivorn" datatype="char" arraysize="*"/>
      <PARAM name="filterID" value="2MASS/2MASS.J" ucd="meta.id" datatype="char" arraysize="*"/>
      <PARAM name="WavelengthUnit" value="Angstrom" ucd="meta.unit" datatype="char" arraysize="*"/>
      <PARAM name="WavelengthEff" value="12350" unit="Angstrom" ucd="em.wl.effective" datatype="double">
        <DESCRIPTION>Effective wavelength</DESCRIPTION>
      </PARAM>
      <PARAM name="FWHM" value="2149.14" unit="Angstrom" datatype="double"/>
      <PARAM name="WidthEff" value="1624.32" unit="Angstrom" datatype="double"/>
      <FIELD name="Wavelength" unit="Angstrom" datatype="double"/>
      <DATA><TABLEDATA><TR><TD>10806.47</TD><TD>0</TD></TR></TABLEDATA></DATA>
    </TABLE>
  </RESOURCE>
</VOTABLE>"#;

    #[test]
    fn parse_filter_votable() {
        let profile = parse_votable(FIXTURE, "2MASS/2MASS.J").unwrap();
        assert_eq!(
            profile,
            FilterProfile {
                filter_id: "2MASS/2MASS.J".into(),
                effective_wavelength_angstroms: 12_350.0,
                fwhm_angstroms: Some(2_149.14),
                width_effective_angstroms: 1_624.32,
            }
        );
    }

    #[test]
    fn other_units_are_rejected() {
        let xml = FIXTURE.replace(
            r#"name="WidthEff" value="1624.32" unit="Angstrom""#,
            r#"name="WidthEff" value="162.432" unit="nm""#,
        );
        assert!(matches!(
            parse_votable(&xml, "2MASS/2MASS.J"),
            Err(RemoteError::Unit { ref quantity, ref unit }) if quantity == "WidthEff" && unit == "nm"
        ));
    }

    #[test]
    fn empty_table_is_not_found() {
        let xml = r#"<?xml version="1.0"?><VOTABLE><RESOURCE type="results"/></VOTABLE>"#;
        assert!(matches!(
            parse_votable(xml, "Nope/Nope.X"),
            Err(RemoteError::NotFound(ref id)) if id == "Nope/Nope.X"
        ));
    }

    #[test]
    fn error_status_is_not_found() {
        let xml = r#"<?xml version="1.0"?>
<VOTABLE><RESOURCE type="results"><INFO name="QUERY_STATUS" value="ERROR">Filter not found</INFO></RESOURCE></VOTABLE>"#;
        assert!(matches!(parse_votable(xml, "Nope/Nope.X"), Err(RemoteError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch() {
        let client = RemoteClient::new(&astro_config::AstroConfig::default()).unwrap();
        let profile = client.fetch("2MASS", "2MASS", "J").await.unwrap();
        println!("{profile:?}");
    }
}
