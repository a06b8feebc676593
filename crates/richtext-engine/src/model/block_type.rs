use std::fmt;

/// Block-level container types understood by the editor
///
/// Tags are the kebab-case names used in the serialized document
/// (`"heading-one"`, `"bulleted-list"`, ...). Parsing a tag never fails:
/// anything unrecognised becomes [`BlockType::Paragraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    /// Custom block: editable text next to a presentation-only scratch panel
    EditText,
}

/// Container types whose direct children must all be list items
pub const LIST_TYPES: [BlockType; 2] = [BlockType::NumberedList, BlockType::BulletedList];

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Paragraph,
        BlockType::HeadingOne,
        BlockType::HeadingTwo,
        BlockType::BlockQuote,
        BlockType::BulletedList,
        BlockType::NumberedList,
        BlockType::ListItem,
        BlockType::EditText,
    ];

    pub fn as_tag(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::HeadingOne => "heading-one",
            BlockType::HeadingTwo => "heading-two",
            BlockType::BlockQuote => "block-quote",
            BlockType::BulletedList => "bulleted-list",
            BlockType::NumberedList => "numbered-list",
            BlockType::ListItem => "list-item",
            BlockType::EditText => "edit-text",
        }
    }

    /// Total parse: unknown or empty tags fall back to paragraph
    pub fn from_tag(tag: &str) -> Self {
        BlockType::ALL
            .into_iter()
            .find(|block_type| block_type.as_tag() == tag)
            .unwrap_or_default()
    }

    pub fn is_list(self) -> bool {
        LIST_TYPES.contains(&self)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        BlockType::from_tag(&tag)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_tag().to_string()
    }
}
