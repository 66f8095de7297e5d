use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// One colored button. `is_lit` only drives rendering; game logic never reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSlot {
    pub index: ColorIndex,
    pub label: String,
    pub is_lit: bool,
}

impl ColorSlot {
    pub fn new(index: ColorIndex, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            is_lit: false,
        }
    }

    pub(crate) fn from_palette(palette: &[String]) -> Vec<Self> {
        palette
            .iter()
            .enumerate()
            .map(|(index, label)| Self::new(index as ColorIndex, label.as_str()))
            .collect()
    }
}
