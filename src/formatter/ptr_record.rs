/// Formats one PTR line in the fixed zonefile layout used by the generated zone fragments:
///
/// ```text
/// 98  IN PTR  host001.ip.nl.tmo.    ; test comment
/// ```
///
/// The spacing is part of the output format and must not change.
pub fn format_ptr_record(owner: &str, fqdn: &str, comment: &str) -> String {
    format!("{}  IN PTR  {}.    ;{}", owner, fqdn, comment)
}
