//! TLS certificates view: one row per certificate/port combination.

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::report::Report;
use crate::models::tls_certificate::ReportTlsCertificate;
use crate::models::xml;

/// Build the TLS certificates collection.
///
/// Requires both the `ssl_certs` count node and the `tls_certificates`
/// container. A certificate valid on N ports is exploded into N entities,
/// each carrying a single port; `counts.all` stays the un-exploded server
/// total while `filtered`/`length`/`rows` reflect the exploded rows.
pub fn parse_tls_certificates(
    report: &Report,
    filter: &Filter,
) -> CollectionList<ReportTlsCertificate> {
    let (Some(ssl_certs), Some(container)) =
        (report.ssl_certs.as_ref(), report.tls_certificates.as_ref())
    else {
        return CollectionList::empty(filter);
    };

    let mut entities = Vec::new();
    for element in xml::elements(container.tls_certificate.as_ref()) {
        let certificate = ReportTlsCertificate::from_element(element);
        for port in certificate.ports.clone() {
            entities.push(certificate.copy_for_port(port));
        }
    }

    let counts = CollectionCounts::for_entities(entities.len(), ssl_certs.count);
    CollectionList::new(entities, counts, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> Report {
        Report::from_value(value).unwrap()
    }

    #[test]
    fn empty_unless_both_nodes_present() {
        let filter = Filter::default();
        assert!(parse_tls_certificates(
            &report(json!({"ssl_certs": {"count": 1}})),
            &filter
        )
        .entities
        .is_empty());
        assert!(parse_tls_certificates(
            &report(json!({"tls_certificates": {"tls_certificate": []}})),
            &filter
        )
        .entities
        .is_empty());
    }

    #[test]
    fn explodes_certificates_per_port() {
        let list = parse_tls_certificates(
            &report(json!({
                "ssl_certs": {"count": 1},
                "tls_certificates": {"tls_certificate": {
                    "serial": "01ABC",
                    "subject_dn": "CN=example.com",
                    "ports": {"port": [4021, 4023]},
                }},
            })),
            &Filter::default(),
        );

        assert_eq!(list.entities.len(), 2);
        assert_eq!(list.entities[0].port, Some(4021));
        assert_eq!(list.entities[0].ports, vec![4021]);
        assert_eq!(list.entities[1].port, Some(4023));
        assert_eq!(list.entities[1].ports, vec![4023]);
        assert_eq!(list.entities[0].serial, list.entities[1].serial);
        // `all` is the un-exploded server total.
        assert_eq!(list.counts.all, 1);
        assert_eq!(list.counts.filtered, 2);
        assert_eq!(list.counts.length, 2);
    }

    #[test]
    fn certificate_without_ports_yields_no_rows() {
        let list = parse_tls_certificates(
            &report(json!({
                "ssl_certs": {"count": 1},
                "tls_certificates": {"tls_certificate": {"serial": "01ABC"}},
            })),
            &Filter::default(),
        );
        assert!(list.entities.is_empty());
        assert_eq!(list.counts.all, 1);
    }
}
