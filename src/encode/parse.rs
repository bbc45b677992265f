//! Read a generated definitions artifact back into a [`PixelTable`].
//!
//! Only the parts this crate emits are understood: the two dimension
//! constants and the `static const uint8_t <name>_pixels[]` initializer.
//! Used to check that what lands in firmware decodes to the source image.

use once_cell::sync::Lazy;
use regex::Regex;

use super::PixelTable;
use crate::error::{PixelbakeError, Result};
use crate::pixel::ChannelOrder;

static HEX_BYTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0[xX]([0-9a-fA-F]{1,2})\b").expect("static regex"));

/// Parse the dimensions and pixel table of the image named `name`.
///
/// `order` is not recorded in the C source; the caller states which order
/// the table was generated for.
pub fn parse_c_source(text: &str, name: &str, order: ChannelOrder) -> Result<PixelTable> {
    let width = parse_dimension(text, name, "w")?;
    let height = parse_dimension(text, name, "h")?;

    let table_re = Regex::new(&format!(
        r"static\s+const\s+uint8_t\s+{}_pixels\s*\[\s*\]\s*=\s*\{{([^}}]*)\}}\s*;",
        regex::escape(name)
    ))
    .map_err(|e| PixelbakeError::InvalidTable(e.to_string()))?;

    let body = table_re
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| PixelbakeError::InvalidTable(format!("no {}_pixels table found", name)))?
        .as_str();

    let bytes = HEX_BYTE
        .captures_iter(body)
        .map(|c| u8::from_str_radix(&c[1], 16))
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|e| PixelbakeError::InvalidTable(format!("bad table byte: {}", e)))?;

    PixelTable::from_raw(width, height, order, bytes)
}

fn parse_dimension(text: &str, name: &str, suffix: &str) -> Result<u32> {
    let re = Regex::new(&format!(
        r"const\s+int\s+{}_{}\s*=\s*(\d+)\s*;",
        regex::escape(name),
        suffix
    ))
    .map_err(|e| PixelbakeError::InvalidTable(e.to_string()))?;

    re.captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .ok_or_else(|| PixelbakeError::InvalidTable(format!("missing constant {}_{}", name, suffix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
#include "dot.h"

const int dot_w = 2;
const int dot_h = 1;

static const uint8_t dot_pixels[] = {
    0x0a, 0x0b, 0x0c, 0xff, 0x00, 0x7f,
};
"#;

    #[test]
    fn test_parse_minimal_source() {
        let table = parse_c_source(SOURCE, "dot", ChannelOrder::Bgr).unwrap();
        assert_eq!((table.width(), table.height()), (2, 1));
        assert_eq!(table.as_bytes(), &[0x0a, 0x0b, 0x0c, 0xff, 0x00, 0x7f]);
        assert_eq!(table.channel_order(), ChannelOrder::Bgr);
    }

    #[test]
    fn test_scaled_constants_are_not_mistaken_for_dimensions() {
        let text = SOURCE.replace(
            "const int dot_w = 2;",
            "const int dot_scaled_w = 4;\nconst int dot_w = 2;",
        );
        let table = parse_c_source(&text, "dot", ChannelOrder::Rgb).unwrap();
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_wrong_name_fails() {
        let err = parse_c_source(SOURCE, "logo", ChannelOrder::Rgb).unwrap_err();
        assert!(matches!(err, PixelbakeError::InvalidTable(_)));
    }

    #[test]
    fn test_byte_count_mismatch_fails() {
        let text = SOURCE.replace("const int dot_h = 1;", "const int dot_h = 2;");
        assert!(parse_c_source(&text, "dot", ChannelOrder::Rgb).is_err());
    }
}
