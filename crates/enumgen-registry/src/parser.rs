//! Registry parser.
//!
//! Walks the registry with `quick-xml`'s pull reader and keeps only what value
//! generation needs:
//!
//! ```xml
//! <registry>
//!     <enums name="VkResult" type="enum">
//!         <enum value="0" name="VK_SUCCESS" comment="Command completed successfully"/>
//!     </enums>
//!     <extensions>
//!         <extension name="VK_KHR_swapchain" number="2">
//!             <require>
//!                 <enum offset="4" extends="VkResult" dir="-" name="VK_ERROR_OUT_OF_DATE_KHR"/>
//!             </require>
//!         </extension>
//!     </extensions>
//! </registry>
//! ```
//!
//! `<types>`, `<commands>`, `<feature>` and bitmask `<enums>` blocks are skipped.

use std::num::NonZeroU32;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::model::{
    Contribution, ContributionKind, EnumDecl, Enumerant, Extension, Sign, SpecModel,
};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed registry XML near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("registry document has no root element")]
    EmptyDocument,
    #[error("registry ended inside `<{element}>`")]
    UnclosedElement { element: String },
    #[error("registry root `<{root}>` has no `<{element}>` element")]
    MissingElement { root: String, element: &'static str },
    #[error("`<{element}>` is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("`{attribute}=\"{value}\"` on `{element}` is not a valid {expected}")]
    InvalidNumber {
        element: String,
        attribute: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Parse a registry document into a `SpecModel`.
pub fn parse_registry(text: &str) -> Result<SpecModel, ParseError> {
    RegistryParser::new(text).run()
}

/// Attributes of one element, unescaped and owned.
#[derive(Debug, Default)]
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn read(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.push((key, value));
        }
        Ok(Self(attrs))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, but an empty value counts as absent.
    fn get_nonempty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}

struct RegistryParser<'a> {
    reader: Reader<&'a [u8]>,
    /// Names of the currently open elements, root first.
    stack: Vec<String>,
    root: Option<String>,
    saw_extensions: bool,
    open_enum: Option<EnumDecl>,
    /// Extension currently being read; `None` inside a provisional one.
    open_extension: Option<Extension>,
    model: SpecModel,
}

impl<'a> RegistryParser<'a> {
    fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            stack: Vec::new(),
            root: None,
            saw_extensions: false,
            open_enum: None,
            open_extension: None,
            model: SpecModel::default(),
        }
    }

    fn run(mut self) -> Result<SpecModel, ParseError> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(source) => return Err(self.xml_error(source)),
            };
            match event {
                Event::Start(start) => {
                    let name = element_name(&start);
                    let attrs = Attrs::read(&start).map_err(|e| self.xml_error(e))?;
                    self.open(&name, &attrs)?;
                    self.stack.push(name);
                }
                Event::Empty(start) => {
                    let name = element_name(&start);
                    let attrs = Attrs::read(&start).map_err(|e| self.xml_error(e))?;
                    self.open(&name, &attrs)?;
                    self.close(&name);
                }
                Event::End(_) => {
                    if let Some(name) = self.stack.pop() {
                        self.close(&name);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = self.stack.pop() {
            return Err(ParseError::UnclosedElement { element });
        }

        let Some(root) = self.root else {
            return Err(ParseError::EmptyDocument);
        };
        if !self.saw_extensions {
            return Err(ParseError::MissingElement {
                root,
                element: "extensions",
            });
        }

        tracing::debug!(
            enums = self.model.enums.len(),
            extensions = self.model.extensions.len(),
            provisional = self.model.skipped_provisional.len(),
            "parsed registry"
        );
        Ok(self.model)
    }

    fn xml_error(&self, source: quick_xml::Error) -> ParseError {
        ParseError::Xml {
            position: self.reader.buffer_position() as u64,
            source,
        }
    }

    /// Name of the element `depth` levels above the one being opened.
    fn ancestor(&self, depth: usize) -> Option<&str> {
        self.stack
            .len()
            .checked_sub(depth)
            .and_then(|i| self.stack.get(i))
            .map(String::as_str)
    }

    fn open(&mut self, name: &str, attrs: &Attrs) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            if self.root.is_none() {
                self.root = Some(name.to_string());
            }
            return Ok(());
        }

        let at_top_level = self.stack.len() == 1;
        match name {
            "enums" if at_top_level => {
                if attrs.get("type") == Some("enum") {
                    self.open_enum = Some(EnumDecl {
                        name: require_attr(attrs, "enums", "name")?.to_string(),
                        values: Vec::new(),
                    });
                }
            }
            "enum" if self.ancestor(1) == Some("enums") && self.stack.len() == 2 => {
                self.native_value(attrs)?;
            }
            "extensions" if at_top_level => self.saw_extensions = true,
            "extension" if self.stack.len() == 2 && self.ancestor(1) == Some("extensions") => {
                self.open_extension = self.begin_extension(attrs)?;
            }
            "enum"
                if self.stack.len() == 4
                    && self.ancestor(1) == Some("require")
                    && self.ancestor(2) == Some("extension") =>
            {
                self.contribution(attrs)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &str) {
        match name {
            "enums" if self.stack.len() == 1 => {
                if let Some(decl) = self.open_enum.take() {
                    self.model.enums.push(decl);
                }
            }
            "extension" if self.stack.len() == 2 => {
                if let Some(ext) = self.open_extension.take() {
                    self.model.extensions.push(ext);
                }
            }
            _ => {}
        }
    }

    fn native_value(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let Some(decl) = self.open_enum.as_mut() else {
            return Ok(());
        };
        let name = require_attr(attrs, "enum", "name")?;
        let Some(raw) = attrs.get("value") else {
            // Aliases (`alias=`) name an existing value; nothing to emit.
            tracing::trace!(name, enum_name = %decl.name, "skipping native alias");
            return Ok(());
        };
        let value = parse_integer(raw).ok_or_else(|| ParseError::InvalidNumber {
            element: name.to_string(),
            attribute: "value",
            value: raw.to_string(),
            expected: "integer",
        })?;
        decl.values.push(
            Enumerant::new(name, value).with_comment(attrs.get("comment").map(str::to_string)),
        );
        Ok(())
    }

    fn begin_extension(&mut self, attrs: &Attrs) -> Result<Option<Extension>, ParseError> {
        let name = require_attr(attrs, "extension", "name")?.to_string();

        if attrs
            .get_nonempty("provisional")
            .is_some_and(|p| p != "false") {
            tracing::info!(extension = %name, "ignoring provisional extension");
            self.model.skipped_provisional.push(name);
            return Ok(None);
        }

        let number = parse_extension_number(
            require_attr(attrs, "extension", "number")?,
            &name,
            "number",
        )?;
        Ok(Some(Extension {
            name,
            number,
            contributions: Vec::new(),
        }))
    }

    fn contribution(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let Some(ext) = self.open_extension.as_mut() else {
            return Ok(());
        };
        // Without `extends` the entry is an extension constant such as
        // `VK_KHR_SURFACE_SPEC_VERSION`.
        let Some(extends) = attrs.get_nonempty("extends") else {
            return Ok(());
        };
        let name = require_attr(attrs, "enum", "name")?.to_string();

        let kind = if let Some(target) = attrs.get_nonempty("alias") {
            ContributionKind::Alias {
                target: target.to_string(),
            }
        } else if let Some(bit) = attrs.get_nonempty("bitpos") {
            ContributionKind::BitPosition {
                bit: bit.to_string(),
            }
        } else if let Some(raw_offset) = attrs.get_nonempty("offset") {
            let offset = raw_offset
                .trim()
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidNumber {
                    element: name.clone(),
                    attribute: "offset",
                    value: raw_offset.to_string(),
                    expected: "non-negative integer",
                })?;
            let number = match attrs.get_nonempty("extnumber") {
                Some(raw) => parse_extension_number(raw, &name, "extnumber")?,
                None => ext.number,
            };
            ContributionKind::Eligible {
                offset,
                sign: Sign::from_dir(attrs.get("dir")),
                number,
                comment: attrs.get("comment").map(str::to_string),
            }
        } else {
            ContributionKind::NoOffset
        };

        if let Some(reason) = kind.exclusion_reason() {
            tracing::debug!(
                extension = %ext.name,
                name = %name,
                extends,
                reason,
                "excluding contribution from value generation"
            );
        }

        ext.contributions.push(Contribution {
            extends: extends.to_string(),
            name,
            kind,
        });
        Ok(())
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn require_attr<'s>(
    attrs: &'s Attrs,
    element: &str,
    attribute: &'static str,
) -> Result<&'s str, ParseError> {
    attrs.get(attribute).ok_or_else(|| ParseError::MissingAttribute {
        element: element.to_string(),
        attribute,
    })
}

fn parse_extension_number(
    raw: &str,
    element: &str,
    attribute: &'static str,
) -> Result<NonZeroU32, ParseError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ParseError::InvalidNumber {
            element: element.to_string(),
            attribute,
            value: raw.to_string(),
            expected: "extension number (1 or greater)",
        })
}

/// Parse a native enum value: decimal, negative decimal or `0x` hex.
pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    let text = raw.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}
