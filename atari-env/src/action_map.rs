use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::emulator::AtariAction;
use crate::prelude::{AleError, ModelActionType};

/// Bidirectional mapping between the emulator's actions of a game and zero-based model action indices
#[derive(Clone, Debug)]
pub struct ActionMapping {
    to_native: Vec<AtariAction>,
    to_index: FxHashMap<AtariAction, ModelActionType>,
}

impl ActionMapping {
    /// Index `i` maps to the `i`-th entry of `minimal_action_set`
    pub fn new(minimal_action_set: Vec<AtariAction>) -> Result<Self> {
        if minimal_action_set.is_empty() {
            return Err(AleError::from("minimal action set is empty"))?;
        }
        let mut to_index = FxHashMap::default();
        for (i, &action) in minimal_action_set.iter().enumerate() {
            if to_index.insert(action, i as ModelActionType).is_some() {
                return Err(AleError(format!("action {} occurs twice in the minimal action set", action)))?;
            }
        }
        Ok(Self {
            to_native: minimal_action_set,
            to_index,
        })
    }

    pub fn len(&self) -> usize { self.to_native.len() }

    pub fn to_native(
        &self,
        index: ModelActionType,
    ) -> Result<AtariAction> {
        self.to_native.get(index as usize).copied().ok_or_else(|| {
            AleError(format!("action index {} out of range 0..{}", index, self.to_native.len())).into()
        })
    }

    pub fn to_index(
        &self,
        action: AtariAction,
    ) -> Result<ModelActionType> {
        self.to_index
            .get(&action)
            .copied()
            .ok_or_else(|| AleError(format!("action {} is not part of the minimal action set", action)).into())
    }

    /// All valid indices in ascending order
    pub fn indices(&self) -> Vec<ModelActionType> { (0..self.to_native.len() as ModelActionType).collect() }
}
