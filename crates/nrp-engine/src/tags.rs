use regex::bytes::Regex;

/// Find `name#1234` in raw lobby bytes and return it as a battletag.
///
/// The discriminator is 4 to 8 digits immediately after `#`. Any failure
/// (no match, bad name, non-UTF-8 digits) yields `None`.
pub fn battletag(lobby: &[u8], name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let pattern = format!(r"{}#(\d{{4,8}})", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(lobby)?;
    let digits = std::str::from_utf8(caps.get(1)?.as_bytes()).ok()?;
    Some(format!("{name}#{digits}"))
}
