//! The four member categories of a component surface.

use serde::Serialize;

/// A kind of public member a component declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Props.
    Inputs,
    /// Emitted events.
    Events,
    /// Slots.
    Slots,
    /// Members made public through `expose`.
    ExposedMembers,
}

impl Category {
    /// All categories in surface order.
    pub const ALL: [Category; 4] = [
        Category::Inputs,
        Category::Events,
        Category::Slots,
        Category::ExposedMembers,
    ];

    /// Key of the category in a component options object.
    pub const fn options_key(self) -> &'static str {
        match self {
            Self::Inputs => "props",
            Self::Events => "emits",
            Self::Slots => "slots",
            Self::ExposedMembers => "expose",
        }
    }

    /// Compiler macro declaring the category in `<script setup>`.
    pub const fn declaration_macro(self) -> &'static str {
        match self {
            Self::Inputs => "defineProps",
            Self::Events => "defineEmits",
            Self::Slots => "defineSlots",
            Self::ExposedMembers => "defineExpose",
        }
    }

    /// Instance property whose type lists the category's members.
    pub const fn instance_bag(self) -> Option<&'static str> {
        match self {
            Self::Inputs => Some("$props"),
            Self::Slots => Some("$slots"),
            Self::Events | Self::ExposedMembers => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inputs => "inputs",
            Self::Events => "events",
            Self::Slots => "slots",
            Self::ExposedMembers => "exposedMembers",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
