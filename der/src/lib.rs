use nom::{IResult, Parser};

pub mod error;

pub use error::{Error, Result};

/// DER tag, restricted to the universal tags that key structures use plus
/// the context-specific class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Utf8String,
    Sequence,
    Set,
    PrintableString,
    Ia5String,
    UtcTime,
    GeneralizedTime,
    /// Context-specific tag, e.g. the `[0]`/`[1]` slots of a SEC1 key.
    ContextSpecific { slot: u8, constructed: bool },
    Unsupported(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        if value & 0xc0 == 0x80 {
            return Tag::ContextSpecific {
                slot: value & 0x1f,
                constructed: value & 0x20 != 0,
            };
        }
        match value {
            0x02 => Tag::Integer,
            0x03 => Tag::BitString,
            0x04 => Tag::OctetString,
            0x05 => Tag::Null,
            0x06 => Tag::ObjectIdentifier,
            0x0c => Tag::Utf8String,
            0x13 => Tag::PrintableString,
            0x16 => Tag::Ia5String,
            0x17 => Tag::UtcTime,
            0x18 => Tag::GeneralizedTime,
            0x30 => Tag::Sequence,
            0x31 => Tag::Set,
            _ => Tag::Unsupported(value),
        }
    }
}

impl Tag {
    const fn is_constructed(self) -> bool {
        matches!(
            self,
            Tag::Sequence
                | Tag::Set
                | Tag::ContextSpecific {
                    constructed: true,
                    ..
                }
        )
    }
}

/// One parsed tag-length-value element.
///
/// Constructed elements (SEQUENCE, SET, constructed context-specific tags)
/// hold their children recursively parsed; primitive elements hold raw
/// content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Constructed(Vec<Tlv>),
    Primitive(Vec<u8>),
}

/// Nesting bound for constructed elements. Key structures stay well under
/// ten levels; anything deeper is rejected rather than recursed into.
const MAX_DEPTH: usize = 32;

impl Tlv {
    /// Parses exactly one DER object covering the whole input.
    ///
    /// Fails with [`Error::Truncated`] on malformed or incomplete encodings,
    /// with [`Error::TrailingData`] when bytes remain after the object, and
    /// with [`Error::NestingTooDeep`] when constructed elements nest beyond
    /// the parser's depth bound.
    pub fn parse(input: &[u8]) -> Result<Tlv> {
        let (rest, tlv) = Self::parse_tlv(input, 0)?;
        if !rest.is_empty() {
            return Err(Error::TrailingData);
        }
        Ok(tlv)
    }

    fn parse_tlv(input: &[u8], depth: usize) -> Result<(&[u8], Tlv)> {
        if depth >= MAX_DEPTH {
            return Err(Error::NestingTooDeep);
        }
        let (input, (tag, data)) = parse_header(input).map_err(|_| Error::Truncated)?;

        if tag.is_constructed() {
            let mut children = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (remaining, child) = Self::parse_tlv(data, depth + 1)?;
                data = remaining;
                children.push(child);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    value: Value::Constructed(children),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                value: Value::Primitive(data.to_vec()),
            },
        ))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The nested elements of a constructed value.
    pub fn children(&self) -> Result<&[Tlv]> {
        match &self.value {
            Value::Constructed(children) => Ok(children),
            Value::Primitive(_) => Err(Error::ExpectedConstructed),
        }
    }

    /// The raw content bytes of a primitive value.
    pub fn primitive(&self) -> Result<&[u8]> {
        match &self.value {
            Value::Primitive(bytes) => Ok(bytes),
            Value::Constructed(_) => Err(Error::ExpectedPrimitive),
        }
    }

    /// The big-endian two's-complement content of an INTEGER.
    pub fn integer_bytes(&self) -> Result<&[u8]> {
        if self.tag != Tag::Integer {
            return Err(Error::UnexpectedTag {
                expected: "INTEGER",
                actual: self.tag,
            });
        }
        self.primitive()
    }

    /// An INTEGER narrowed to `i64`, for small fields such as versions.
    pub fn integer(&self) -> Result<i64> {
        let bytes = self.integer_bytes()?;
        if bytes.is_empty() || bytes.len() > 8 {
            return Err(Error::IntegerOutOfRange);
        }
        let mut value: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
        for &byte in bytes {
            value = (value << 8) | i64::from(byte);
        }
        Ok(value)
    }

    pub fn octet_string(&self) -> Result<&[u8]> {
        if self.tag != Tag::OctetString {
            return Err(Error::UnexpectedTag {
                expected: "OCTET STRING",
                actual: self.tag,
            });
        }
        self.primitive()
    }

    /// The content bits of a BIT STRING, with the leading unused-bits octet
    /// stripped.
    pub fn bit_string(&self) -> Result<&[u8]> {
        if self.tag != Tag::BitString {
            return Err(Error::UnexpectedTag {
                expected: "BIT STRING",
                actual: self.tag,
            });
        }
        let bytes = self.primitive()?;
        let (&unused_bits, rest) = bytes.split_first().ok_or(Error::InvalidBitString)?;
        if unused_bits > 7 {
            return Err(Error::InvalidBitString);
        }
        Ok(rest)
    }

    /// An OBJECT IDENTIFIER rendered in dotted-decimal form.
    pub fn object_identifier(&self) -> Result<String> {
        if self.tag != Tag::ObjectIdentifier {
            return Err(Error::UnexpectedTag {
                expected: "OBJECT IDENTIFIER",
                actual: self.tag,
            });
        }
        let bytes = self.primitive()?;
        let (&first, rest) = bytes.split_first().ok_or(Error::InvalidObjectIdentifier)?;

        let mut arcs: Vec<u64> = vec![u64::from(first / 40), u64::from(first % 40)];
        let mut acc: u64 = 0;
        let mut pending = false;
        for &byte in rest {
            acc = acc
                .checked_mul(128)
                .ok_or(Error::InvalidObjectIdentifier)?
                + u64::from(byte & 0x7f);
            if byte & 0x80 == 0 {
                arcs.push(acc);
                acc = 0;
                pending = false;
            } else {
                pending = true;
            }
        }
        if pending {
            return Err(Error::InvalidObjectIdentifier);
        }

        Ok(arcs
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("."))
    }
}

fn parse_header(input: &[u8]) -> IResult<&[u8], (Tag, &[u8])> {
    let (input, tag) = parse_tag(input)?;
    let (input, length) = parse_length(input)?;
    let (input, data) = nom::bytes::complete::take(length).parse(input)?;
    Ok((input, (tag, data)))
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, byte) = nom::number::be_u8().parse(input)?;
    Ok((input, Tag::from(byte)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, first) = nom::number::be_u8().parse(input)?;
    if first & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, u64::from(first)));
    }

    // long form: low bits give the byte count of the length field
    let count = first & 0x7f;
    if count > 8 {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        )));
    }
    let (input, bytes) = nom::bytes::complete::take(count).parse(input)?;
    let length = bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    Ok((input, length))
}
