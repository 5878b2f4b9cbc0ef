use serde::{Deserialize, Deserializer, Serialize};

/// Closed set of record kinds the upstream API knows about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Story,
    Comment,
    Job,
    Poll,
    #[serde(rename = "pollopt")]
    PollOption,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Comment => "comment",
            ItemKind::Job => "job",
            ItemKind::Poll => "poll",
            ItemKind::PollOption => "poll option",
        }
    }
}

/// One content record, exactly as the upstream source described it.
///
/// Items are never mutated after parsing. Every field the API may omit maps
/// to its zero value, so a sparse response is still a valid item.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Item {
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ItemKind,
    #[serde(rename = "by", deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dead: bool,
    pub parent: Option<u32>,
    pub poll: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub kids: Vec<u32>,
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub score: u32,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parts: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub descendants: u32,
    pub text: Option<String>,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// Stand-in for an identifier the API answered with `null`.
    pub fn missing(id: u32) -> Self {
        Self {
            id,
            deleted: true,
            ..Self::default()
        }
    }

    /// Deleted and dead items exist upstream but must not be shown.
    pub fn is_hidden(&self) -> bool {
        self.deleted || self.dead
    }

    pub fn display_title(&self) -> &str {
        if self.deleted {
            "[deleted]"
        } else if self.dead {
            "[dead]"
        } else {
            self.title.as_deref().unwrap_or("(untitled)")
        }
    }

    /// The body as plain text, or an empty string when there is none.
    pub fn plain_text(&self) -> String {
        self.text.as_deref().map(html_to_text).unwrap_or_default()
    }
}

/// Flattens the small HTML subset the API uses in item bodies.
///
/// `<p>` starts a new paragraph, every other tag is dropped, and the common
/// named and numeric character references are decoded.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['<', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                out.push_str(rest);
                return out;
            };
            let tag = rest[1..end].trim().to_ascii_lowercase();
            if tag == "p" || tag.starts_with("p ") {
                out.push_str("\n\n");
            } else if tag == "br" || tag == "br/" || tag == "br /" {
                out.push('\n');
            }
            rest = &rest[end + 1..];
        } else {
            match rest.find(';').filter(|&end| end <= 10) {
                Some(end) => match decode_entity(&rest[1..end]) {
                    Some(c) => {
                        out.push(c);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &rest[1..];
                    }
                },
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
