//! Response parsing: fault detection, scalar results and the two
//! snapshot payloads.
//!
//! Record fields are read leniently: a bad integer reads as 0, a bad date
//! as `None`, and booleans accept `true` (any case) or `1`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use vh_core::time::parse_xsd;
use vh_core::wire::{SyougoData, SyougoDetail, SyougoHeader, SyukkaData, SyukkaDetail, SyukkaHeader};

use super::error::SoapError;
use super::xml::{parse_document, Element};

/// A parsed response that passed the fault check.
pub(crate) struct Response {
    root: Element,
}

impl Response {
    pub fn parse(xml: &str) -> Result<Self, SoapError> {
        let root = parse_document(xml)?;
        if let Some(fault) = root.find("Fault") {
            let message = fault
                .find("faultstring")
                .map(|f| f.text.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "SOAP Fault".to_string());
            return Err(SoapError::Fault {
                message,
                raw: xml.to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn has(&self, tag: &str) -> bool {
        self.root.find(tag).is_some()
    }

    fn result(&self, tag: &str) -> Result<&Element, SoapError> {
        self.root
            .find(tag)
            .ok_or_else(|| SoapError::MissingResult(tag.to_string()))
    }

    pub fn text(&self, tag: &str) -> Result<String, SoapError> {
        Ok(self.result(tag)?.text.clone())
    }

    pub fn bool(&self, tag: &str) -> Result<bool, SoapError> {
        Ok(self.result(tag)?.text.trim().eq_ignore_ascii_case("true"))
    }

    /// Empty text reads as `None`; anything else must be an XSD `dateTime`.
    pub fn datetime(&self, tag: &str) -> Result<Option<NaiveDateTime>, SoapError> {
        let text = self.text(tag)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        parse_xsd(text)
            .map(Some)
            .ok_or_else(|| SoapError::Value(format!("Failed to parse xsd:dateTime: {text}")))
    }

    /// `<string>` children of the result; a missing result is an empty list.
    pub fn strings(&self, tag: &str) -> Vec<String> {
        self.root
            .find(tag)
            .map(|result| {
                result
                    .find_all("string")
                    .into_iter()
                    .map(|s| s.text.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn base64(&self, tag: &str) -> Result<Vec<u8>, SoapError> {
        let text = self.text(tag)?;
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Ok(Vec::new());
        }
        STANDARD
            .decode(compact)
            .map_err(|e| SoapError::Value(format!("invalid base64 in {tag}: {e}")))
    }

    pub fn syukka_data(&self) -> Option<SyukkaData> {
        let result = self.root.find("GetSyukkaDataResult")?;
        Some(SyukkaData {
            headers: result
                .find_all("SyukkaHeader")
                .into_iter()
                .map(read_syukka_header)
                .collect(),
            details: result
                .find_all("SyukkaMeisai")
                .into_iter()
                .map(read_syukka_detail)
                .collect(),
        })
    }

    pub fn syougo_data(&self) -> Option<SyougoData> {
        let result = self.root.find("GetSyougoDataResult")?;
        Some(SyougoData {
            headers: result
                .find_all("SyougoHeader")
                .into_iter()
                .map(read_syougo_header)
                .collect(),
            details: result
                .find_all("SyougoDtl")
                .into_iter()
                .map(read_syougo_detail)
                .collect(),
        })
    }
}

fn text(e: &Element, name: &str) -> String {
    e.child_text(name).unwrap_or_default().to_string()
}

fn int(e: &Element, name: &str) -> i32 {
    e.child_text(name)
        .and_then(|t| t.trim().parse().ok())
        .unwrap_or(0)
}

fn flag(e: &Element, name: &str) -> bool {
    e.child_text(name)
        .map(str::trim)
        .is_some_and(|t| t.eq_ignore_ascii_case("true") || t == "1")
}

fn date(e: &Element, name: &str) -> Option<NaiveDateTime> {
    e.child_text(name).and_then(parse_xsd)
}

fn read_syukka_header(e: &Element) -> SyukkaHeader {
    SyukkaHeader {
        booking_no: text(e, "BookingNo"),
        syukka_ymd: date(e, "SyukkaYmd"),
        container_count: int(e, "ContainerCount"),
        total_bundole: int(e, "TotalBundole"),
        total_jyuryo: int(e, "TotalJyuryo"),
        kanryo_container_cnt: int(e, "KanryoContainerCnt"),
        kanryo_bundle_sum: int(e, "KanryoBundleSum"),
        // server spelling
        kanryo_jyuryo_sum: int(e, "KnaryoJyuryoSum"),
        last_upd_ymd_hms: date(e, "LastUpdYmdHms"),
    }
}

fn read_syukka_detail(e: &Element) -> SyukkaDetail {
    SyukkaDetail {
        heat_no: text(e, "HeatNo"),
        sokuban: text(e, "Sokuban"),
        syukka_sashizu_no: text(e, "SyukkaSashizuNo"),
        bundle_no: text(e, "bundleNo"),
        jyuryo: int(e, "Jyuryo"),
        booking_no: text(e, "BookingNo"),
    }
}

fn read_syougo_header(e: &Element) -> SyougoHeader {
    SyougoHeader {
        container_id: text(e, "containerID"),
        container_no: text(e, "containerNo"),
        bundle_cnt: int(e, "bundleCnt"),
        sagyou_ymd: date(e, "sagyouYMD"),
        syogo_kanryo: flag(e, "syogoKanryo"),
    }
}

fn read_syougo_detail(e: &Element) -> SyougoDetail {
    SyougoDetail {
        heat_no: text(e, "syogoDtlheatNo"),
        sokuban: text(e, "syogoDtlsokuban"),
        syukka_sashizu_no: text(e, "syougoDtlsyukkaSashizuNo"),
        bundle_no: text(e, "syougoDtlbundleNo"),
        jyuryo: int(e, "syougoDtljyuryo"),
        container_id: text(e, "syougoDtlcontainerID"),
        syougo_kakunin: flag(e, "syougoDtlsyougoKakunin"),
    }
}
