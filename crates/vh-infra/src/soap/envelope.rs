pub(crate) const NS: &str = "http://tempuri.org/";

pub(crate) fn wrap_body(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body>{inner}</soap:Body></soap:Envelope>"
    )
}

pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Appends `<name>value</name>` with the value escaped.
pub(crate) fn tag(out: &mut String, name: &str, value: &str) {
    tag_raw(out, name, &escape(value));
}

/// Appends `<name>raw</name>` as is; for base64 and numbers.
pub(crate) fn tag_raw(out: &mut String, name: &str, raw: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(raw);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_entities() {
        assert_eq!(escape(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }

    #[test]
    fn wraps_body_verbatim() {
        let xml = wrap_body("<X/>");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?><soap:Envelope"));
        assert!(xml.ends_with("<soap:Body><X/></soap:Body></soap:Envelope>"));
    }
}
