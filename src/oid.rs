//! ASN.1 object identifiers for the GOST ciphers.
//!
//! [`ObjectIdentifier`] parses a dotted-decimal OID, resolves its TC26
//! name and produces its DER encoding.

use std::fmt;
use std::str::FromStr;

use crate::error::GostCipherError;

/// DER tag of an OBJECT IDENTIFIER.
const OID_TAG: u8 = 0x06;

/// Dotted OID of the Kuznechik cipher.
pub const KUZNECHIK_OID: &str = "1.2.643.7.1.1.5.2";

/// Dotted OID of the Magma cipher.
pub const MAGMA_OID: &str = "1.2.643.7.1.1.5.1";

/// TC26 registry entries for the cipher arc.
const OID_NAMES: &[(&str, &str)] = &[
    ("1.2.643.7.1.1.5", "id-tc26-cipher"),
    (MAGMA_OID, "id-tc26-cipher-gostr3412-2015-magma"),
    (
        "1.2.643.7.1.1.5.1.1",
        "id-tc26-cipher-gostr3412-2015-magma-ctracpkm",
    ),
    (
        "1.2.643.7.1.1.5.1.2",
        "id-tc26-cipher-gostr3412-2015-magma-ctracpkm-omac",
    ),
    (KUZNECHIK_OID, "id-tc26-cipher-gostr3412-2015-kuznyechik"),
    (
        "1.2.643.7.1.1.5.2.1",
        "id-tc26-cipher-gostr3412-2015-kuznyechik-ctracpkm",
    ),
    (
        "1.2.643.7.1.1.5.2.2",
        "id-tc26-cipher-gostr3412-2015-kuznyechik-ctracpkm-omac",
    ),
    ("1.2.643.7.1.1.7", "id-tc26-wrap"),
    ("1.2.643.7.1.1.7.1", "id-tc26-wrap-gostr3412-2015-magma"),
    (
        "1.2.643.7.1.1.7.1.1",
        "id-tc26-wrap-gostr3412-2015-magma-kexp15",
    ),
    ("1.2.643.7.1.1.7.2", "id-tc26-wrap-gostr3412-2015-kuznyechik"),
    (
        "1.2.643.7.1.1.7.2.1",
        "id-tc26-wrap-gostr3412-2015-kuznyechik-kexp15",
    ),
];

/// A validated object identifier.
///
/// # Examples
/// ```
/// use gostcipher::oid::ObjectIdentifier;
///
/// let oid = ObjectIdentifier::kuznechik();
/// assert_eq!(oid.to_string(), "1.2.643.7.1.1.5.2");
/// assert_eq!(oid.name(), Some("id-tc26-cipher-gostr3412-2015-kuznyechik"));
/// assert_eq!(
///     oid.octet(),
///     vec![0x06, 0x08, 0x2a, 0x85, 0x03, 0x07, 0x01, 0x01, 0x05, 0x02]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

impl ObjectIdentifier {
    /// OID of the Kuznechik cipher.
    pub fn kuznechik() -> Self {
        Self::registered(&[1, 2, 643, 7, 1, 1, 5, 2])
    }

    /// OID of the Magma cipher.
    pub fn magma() -> Self {
        Self::registered(&[1, 2, 643, 7, 1, 1, 5, 1])
    }

    fn registered(arcs: &[u64]) -> Self {
        ObjectIdentifier {
            arcs: arcs.to_vec(),
        }
    }

    /// Numeric arcs of the identifier.
    pub fn digit(&self) -> &[u64] {
        &self.arcs
    }

    /// Registered TC26 name, or `None` for identifiers outside the table.
    pub fn name(&self) -> Option<&'static str> {
        let dotted = self.to_string();
        OID_NAMES
            .iter()
            .find(|(oid, _)| *oid == dotted)
            .map(|(_, name)| *name)
    }

    /// DER encoding: tag, length and base-128 subidentifiers.
    pub fn octet(&self) -> Vec<u8> {
        let mut body = Vec::new();
        // validated on construction: at least two arcs, first <= 2
        encode_base128(self.arcs[0] * 40 + self.arcs[1], &mut body);
        for &arc in &self.arcs[2..] {
            encode_base128(arc, &mut body);
        }

        let mut out = Vec::with_capacity(body.len() + 4);
        out.push(OID_TAG);
        encode_length(body.len(), &mut out);
        out.extend_from_slice(&body);
        out
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = GostCipherError;

    /// Parses a dotted-decimal OID.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidOid`] if any arc is not a decimal
    /// number, there are fewer than two arcs, the first arc exceeds 2, or
    /// the second arc is 40 or more under a first arc of 0 or 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(GostCipherError::InvalidOid);
                }
                part.parse::<u64>().map_err(|_| GostCipherError::InvalidOid)
            })
            .collect::<Result<Vec<u64>, _>>()?;

        match arcs.as_slice() {
            [first, second, ..] if *first < 2 && *second < 40 => {}
            [2, second, ..] if second.checked_add(80).is_some() => {}
            _ => return Err(GostCipherError::InvalidOid),
        }
        Ok(ObjectIdentifier { arcs })
    }
}

fn encode_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut len = 0;
    loop {
        groups[len] = (value & 0x7f) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for (i, group) in groups[..len].iter().enumerate().rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        out.push(group | continuation);
    }
}

fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kuznechik_oid() {
        let oid = ObjectIdentifier::kuznechik();
        assert_eq!(oid.to_string(), "1.2.643.7.1.1.5.2");
        assert_eq!(oid.digit(), &[1, 2, 643, 7, 1, 1, 5, 2]);
        assert_eq!(oid.name(), Some("id-tc26-cipher-gostr3412-2015-kuznyechik"));
        assert_eq!(
            oid.octet(),
            vec![0x06, 0x08, 0x2a, 0x85, 0x03, 0x07, 0x01, 0x01, 0x05, 0x02]
        );
    }

    #[test]
    fn test_magma_oid() {
        let oid = ObjectIdentifier::magma();
        assert_eq!(oid.to_string(), "1.2.643.7.1.1.5.1");
        assert_eq!(oid.name(), Some("id-tc26-cipher-gostr3412-2015-magma"));
        assert_eq!(
            oid.octet(),
            vec![0x06, 0x08, 0x2a, 0x85, 0x03, 0x07, 0x01, 0x01, 0x05, 0x01]
        );
    }

    #[test]
    fn test_parse_round_trips_dotted_form() {
        let oid: ObjectIdentifier = "1.2.643.7.1.1.7.2".parse().unwrap();
        assert_eq!(oid.to_string(), "1.2.643.7.1.1.7.2");
        assert_eq!(oid.name(), Some("id-tc26-wrap-gostr3412-2015-kuznyechik"));
    }

    #[test]
    fn test_unknown_oid_has_no_name() {
        let oid: ObjectIdentifier = "1.3.6.1".parse().unwrap();
        assert_eq!(oid.name(), None);
        assert_eq!(oid.octet(), vec![0x06, 0x03, 0x2b, 0x06, 0x01]);
    }

    #[test]
    fn test_joint_iso_itu_arc() {
        // 2.999 -> first subidentifier 1079 = 0x88 0x37
        let oid: ObjectIdentifier = "2.999.3".parse().unwrap();
        assert_eq!(oid.octet(), vec![0x06, 0x03, 0x88, 0x37, 0x03]);
    }

    #[test]
    fn test_invalid_oids() {
        for bad in [
            "", "1", "3.1", "1.40", "0.40.1", "1..2", "1.2.a", "1.2.", "-1.2", "1.2.+3",
        ] {
            assert_eq!(
                bad.parse::<ObjectIdentifier>(),
                Err(GostCipherError::InvalidOid),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_long_form_length() {
        let dotted = format!("1.2{}", ".1".repeat(200));
        let oid: ObjectIdentifier = dotted.parse().unwrap();
        let der = oid.octet();
        assert_eq!(der[0], 0x06);
        assert_eq!(der[1], 0x81);
        assert_eq!(der[2], 201);
        assert_eq!(der.len(), 3 + 201);
    }
}
