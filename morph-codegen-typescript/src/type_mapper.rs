//! TypeScript type mapper implementation.

use eyre::Result;
use morphgen_codegen::constrain::{TypeContext, TypeMapping};
use morphgen_meta::ConstrainedKind;

/// Maps constrained models to TypeScript type syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapping;

/// Element type of an array, parenthesized when it is a union.
fn array_element(ty: &str) -> String {
    if ty.contains(" | ") {
        format!("({ty})")
    } else {
        ty.to_string()
    }
}

impl TypeMapping for TypeScriptTypeMapping {
    fn any(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("any".to_string())
    }

    fn string(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("string".to_string())
    }

    fn integer(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("number".to_string())
    }

    fn float(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("number".to_string())
    }

    fn boolean(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("boolean".to_string())
    }

    fn object(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn reference(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.name_of(ctx.graph.resolve(ctx.id)).to_string())
    }

    fn enumeration(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn array(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match ctx.model.kind {
            ConstrainedKind::Array { value } => {
                Ok(format!("{}[]", array_element(ctx.type_of(value))))
            }
            _ => Ok("any[]".to_string()),
        }
    }

    fn tuple(&self, ctx: &TypeContext<'_>) -> Result<String> {
        let ConstrainedKind::Tuple { values } = &ctx.model.kind else {
            return Ok("any[]".to_string());
        };
        let types: Vec<&str> = values.iter().map(|v| ctx.type_of(v.value)).collect();
        Ok(format!("[{}]", types.join(", ")))
    }

    fn union(&self, ctx: &TypeContext<'_>) -> Result<String> {
        let ConstrainedKind::Union { members } = &ctx.model.kind else {
            return Ok("any".to_string());
        };
        let types: Vec<&str> = members.iter().map(|&m| ctx.type_of(m)).collect();
        Ok(types.join(" | "))
    }

    fn dictionary(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match ctx.model.kind {
            ConstrainedKind::Dictionary { key, value, .. } => Ok(format!(
                "Map<{}, {}>",
                ctx.type_of(key),
                ctx.type_of(value)
            )),
            _ => Ok("Map<string, any>".to_string()),
        }
    }
}
