// 8.3 short names

/// Raw name field, 8 name bytes followed by 3 extension bytes, space padded
pub type RawName = [u8; 11];

/// Dotted short name, bytes above 0x7F widen to two UTF-8 bytes
pub type ShortName = heapless::String<24>;

const PADDING: u8 = b' ';

/// Format a raw 8.3 field into its canonical dotted form, e.g. `FOO     TXT` -> `FOO.TXT`
pub fn format83(raw: &RawName) -> ShortName {
    let mut name = ShortName::new();
    for &byte in raw[..8].iter().take_while(|&&byte| byte != PADDING) {
        name.push(byte as char).ok();
    }
    if raw[8] == PADDING {
        return name;
    }
    name.push('.').ok();
    for &byte in raw[8..].iter().take_while(|&&byte| byte != PADDING) {
        name.push(byte as char).ok();
    }
    name
}

/// Volume labels use all 11 bytes without a dot, trailing spaces dropped
pub fn label(raw: &RawName) -> ShortName {
    let end = raw.iter().rposition(|&byte| byte != PADDING).map_or(0, |index| index + 1);
    let mut name = ShortName::new();
    for &byte in raw[..end].iter() {
        name.push(byte as char).ok();
    }
    name
}

/// Case-insensitive comparison between a formatted short name and a user supplied name
pub fn matches(name: &str, query: &str) -> bool {
    name.eq_ignore_ascii_case(query)
}
