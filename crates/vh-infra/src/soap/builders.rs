use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use vh_core::time::format_xsd;
use vh_core::wire::{BunningData, CollateData};

use super::envelope::{tag, tag_raw, wrap_body, NS};

/// Request of an action without arguments.
pub(crate) fn build_no_arg(action: &str) -> String {
    wrap_body(&format!("<{action} xmlns=\"{NS}\" />"))
}

fn build_with(action: &str, args: impl FnOnce(&mut String)) -> String {
    let mut inner = format!("<{action} xmlns=\"{NS}\">");
    args(&mut inner);
    inner.push_str("</");
    inner.push_str(action);
    inner.push('>');
    wrap_body(&inner)
}

/// `GetUpdateYmdHms` / `GetSyukkaData`: one `sagyouYmd` argument.
pub(crate) fn build_sagyou_ymd_call(action: &str, sagyou_ymd: NaiveDateTime) -> String {
    build_with(action, |out| tag(out, "sagyouYmd", &format_xsd(sagyou_ymd)))
}

pub(crate) fn build_upload_binary_file(file_name: &str, buffer: &[u8]) -> String {
    build_with("UploadBinaryFile", |out| {
        tag(out, "fileName", file_name);
        tag_raw(out, "buffer", &STANDARD.encode(buffer));
    })
}

pub(crate) fn build_get_download_handy_execute_file(file_name: &str) -> String {
    build_with("GetDownloadHandyExecuteFile", |out| {
        tag(out, "fileName", file_name)
    })
}

pub(crate) fn build_send_syukka_data(data: &BunningData) -> String {
    build_with("SendSyukkaData", |out| {
        out.push_str("<data>");
        tag(out, "SyukkaYmd", &format_xsd(data.syukka_ymd));
        tag(out, "ContainerNo", &data.container_no);
        tag_raw(out, "ContainerJyuryo", &data.container_jyuryo.to_string());
        tag_raw(out, "DunnageJyuryo", &data.dunnage_jyuryo.to_string());
        tag(out, "SealNo", &data.seal_no);

        out.push_str("<Bundles>");
        for bundle in &data.bundles {
            out.push_str("<SyukkaMeisai>");
            tag(out, "HeatNo", &bundle.heat_no);
            tag(out, "Sokuban", &bundle.sokuban);
            tag(out, "SyukkaSashizuNo", &bundle.syukka_sashizu_no);
            // lower-case b on the server contract
            tag(out, "bundleNo", &bundle.bundle_no);
            tag_raw(out, "Jyuryo", &bundle.jyuryo.to_string());
            tag(out, "BookingNo", &bundle.booking_no);
            out.push_str("</SyukkaMeisai>");
        }
        out.push_str("</Bundles>");

        if !data.container_photo.is_empty() {
            tag_raw(out, "ContainerPhoto", &STANDARD.encode(&data.container_photo));
        }
        if !data.seal_photo.is_empty() {
            tag_raw(out, "SealPhoto", &STANDARD.encode(&data.seal_photo));
        }
        out.push_str("</data>");
    })
}

pub(crate) fn build_send_syougo_data(data: &CollateData) -> String {
    build_with("SendSyougoData", |out| {
        out.push_str("<data>");
        tag(out, "containerID", &data.container_id);
        tag_raw(out, "syogoKanryo", bool_text(data.syogo_kanryo));

        out.push_str("<CollateDtls>");
        for dtl in &data.details {
            out.push_str("<CollateDtl>");
            tag(out, "collateDtlheatNo", &dtl.heat_no);
            tag(out, "collateDtlsokuban", &dtl.sokuban);
            tag_raw(out, "collateDtlsyougoKakunin", bool_text(dtl.syougo_kakunin));
            out.push_str("</CollateDtl>");
        }
        out.push_str("</CollateDtls>");
        out.push_str("</data>");
    })
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
