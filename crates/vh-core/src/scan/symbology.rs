/// Fragment lists checked against both the AIM id and the decoder's own
/// symbology name, first match wins.
const NAME_FRAGMENTS: &[(&[&str], &str)] = &[
    (&["CODE39"], "Code39"),
    (&["CODE93"], "Code93"),
    (&["CODE128"], "Code128"),
    (&["CODABAR", "NW7"], "Codabar(NW7)"),
    (&["STANDARD2OF5", "STF"], "Standard 2of5"),
    (&["INTERLEAVED2OF5", "ITF", "I2OF5"], "ITF(2of5)"),
    (&["EAN8"], "JAN-8 (EAN-8)"),
    (&["EAN13", "UPC_A", "UPC_E", "EAN13UPCA"], "JAN-13 (EAN/UPC系)"),
    (&["GS1", "DATABAR", "COMPOSITE"], "GS1 DataBar"),
    (&["MSI"], "MSI"),
    (&["MICROQR"], "Micro QR"),
    (&["QR"], "QR"),
    (&["DATAMATRIX"], "DataMatrix"),
    (&["PDF417"], "PDF417"),
    (&["MICROPDF"], "MicroPDF"),
    (&["AZTEC"], "Aztec"),
    (&["MAXICODE"], "MaxiCode"),
    (&["SQRC"], "SQRC"),
    (&["IQR"], "iQR"),
    (&["RMQR"], "rMQR"),
    (&["OCR"], "OCR"),
];

const AIM_PREFIXES: &[(&str, &str)] = &[
    ("]E4", "JAN-8 (EAN-8)"),
    ("]E", "JAN-13 (EAN/UPC系)"),
    ("]A", "Code39"),
    ("]G", "Code93"),
    ("]C", "Code128"),
    ("]I", "ITF(2of5)"),
    ("]F", "Codabar(NW7)"),
];

/// Display name of a symbology from the AIM identifier and/or the decoder's
/// symbology name. `None` when neither is recognized.
pub fn symbology_display_name(aim: Option<&str>, denso: Option<&str>) -> Option<&'static str> {
    let aim = aim.unwrap_or_default().to_uppercase();
    let denso = denso.unwrap_or_default().to_uppercase();

    if let Some((_, name)) = AIM_PREFIXES.iter().find(|(prefix, _)| aim.starts_with(prefix)) {
        return Some(*name);
    }

    NAME_FRAGMENTS
        .iter()
        .find(|(fragments, _)| {
            fragments
                .iter()
                .any(|f| aim.contains(f) || denso.contains(f))
        })
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_prefix_takes_priority() {
        assert_eq!(symbology_display_name(Some("]E4"), Some("CODE39")), Some("JAN-8 (EAN-8)"));
        assert_eq!(symbology_display_name(Some("]e0"), None), Some("JAN-13 (EAN/UPC系)"));
        assert_eq!(symbology_display_name(Some("]I1"), None), Some("ITF(2of5)"));
    }

    #[test]
    fn falls_back_to_name_fragments_in_order() {
        assert_eq!(symbology_display_name(None, Some("Code128")), Some("Code128"));
        assert_eq!(symbology_display_name(None, Some("MICROQR")), Some("Micro QR"));
        assert_eq!(symbology_display_name(None, Some("qr_code")), Some("QR"));
        assert_eq!(symbology_display_name(None, Some("gs1_databar_limited")), Some("GS1 DataBar"));
    }

    #[test]
    fn unknown_symbology_has_no_name() {
        assert_eq!(symbology_display_name(None, None), None);
        assert_eq!(symbology_display_name(Some("]Z0"), Some("HANXIN")), None);
    }
}
