//! Type alias renderer for every model that is neither an object nor an
//! enum, such as unions, tuples and arrays.

use morphgen_codegen::preset::{Preset, hooks};

use super::targets::TYPE;

pub(crate) fn register(preset: Preset) -> Preset {
    preset.hook(TYPE, hooks::SELF, |r, _| {
        let model = r.model();
        Ok(format!("type {} = {};", model.name, model.ty))
    })
}
