//! JSON document front end.
//!
//! The top-level object describes the synthetic root and nests elements
//! through `children`. Every field is optional. Strings are used as-is: JSON
//! already has its own escapes, so no formspec escape decoding is applied.

use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::assets::InventoryLocation;
use crate::dom::{ButtonState, Element, ElementKind, ElementTree, InputState, InventoryGrid, NodeId};
use crate::style::{restyle, Color, StyleSpec};

use super::{finish, ParseContext, ParseError, ParseWarning, Parsed, Warnings};

/// Fields that only mean something on an inventory node.
const INVENTORY_FIELDS: [&str; 4] = ["columns", "rows", "location", "list"];

/// Parse a JSON formspec document.
pub fn parse_document(source: &str, ctx: &ParseContext<'_>) -> Result<Parsed, ParseError> {
    let value: Value = serde_json::from_str(source)?;
    let Value::Object(fields) = value else {
        return Err(ParseError::InvalidRoot);
    };
    let mut builder = DocumentBuilder {
        ctx,
        tree: ElementTree::new(Element::new(ctx.default_style.clone())),
        warnings: Warnings::default(),
    };
    let root = builder.tree.root();
    builder.node(root, &fields, "");
    debug!(nodes = builder.tree.len(), "parsed document");
    finish(builder.tree, builder.warnings)
}

struct DocumentBuilder<'a, 'c> {
    ctx: &'a ParseContext<'c>,
    tree: ElementTree,
    warnings: Warnings,
}

impl DocumentBuilder<'_, '_> {
    /// Fill node `id` from `fields`, then build its children.
    ///
    /// Style goes first so children inherit it, then `type` so text set on an
    /// input puts the caret at the end.
    fn node(&mut self, id: NodeId, fields: &Map<String, Value>, path: &str) {
        if let Some(value) = fields.get("style") {
            self.style(id, value, &join(path, "style"));
        }

        let kind = self.kind(fields, path);
        if let Some(Err(e)) = self.tree.get_mut(id).map(|element| element.promote(kind)) {
            self.warnings.push(e);
        }

        for (key, value) in fields {
            let field = join(path, key);
            match key.as_str() {
                "style" | "type" | "children" => {}
                key if INVENTORY_FIELDS.iter().any(|f| *f == key) => {}
                "rect" => self.rect(id, value, &field),
                "aspect" => self.aspect(id, value, &field),
                "bgcolor" => self.bgcolor(id, value, &field),
                "image" => self.image(id, value, &field),
                "text" => {
                    if let (Some(text), Some(element)) = (self.string(value, &field), self.tree.get_mut(id)) {
                        element.set_text(text);
                    }
                }
                _ => self.warnings.push(ParseWarning::UnknownField(field)),
            }
        }

        if let Some(value) = fields.get("children") {
            self.children(id, value, &join(path, "children"));
        }
    }

    fn children(&mut self, parent: NodeId, value: &Value, path: &str) {
        let Some(children) = value.as_array() else {
            return self.wrong_type(path, "an array of objects");
        };
        let style = self.style_of(parent);
        for (i, child) in children.iter().enumerate() {
            let child_path = format!("{path}[{i}]");
            let Some(fields) = child.as_object() else {
                self.wrong_type(&child_path, "an object");
                continue;
            };
            if let Some(id) = self.tree.insert_child(parent, Element::new(style.clone())) {
                self.node(id, fields, &child_path);
            }
        }
    }

    /// Kind named by `type`. Inventory fields on any other kind are ignored.
    fn kind(&mut self, fields: &Map<String, Value>, path: &str) -> ElementKind {
        let name = match fields.get("type") {
            Some(value) => self.string(value, &join(path, "type")).unwrap_or("container"),
            None => "container",
        };
        let kind = match name {
            "container" => ElementKind::Container,
            "button" => ElementKind::Button(ButtonState::default()),
            "input" => ElementKind::Input(InputState::default()),
            "inventory" => return self.inventory(fields, path),
            other => {
                self.warnings.push(ParseWarning::UnknownKind(other.to_owned()));
                ElementKind::Container
            }
        };
        for field in INVENTORY_FIELDS.iter().filter(|f| fields.contains_key(**f)) {
            self.warnings.push(ParseWarning::IgnoredField { field: join(path, field), kind: kind.name() });
        }
        kind
    }

    fn inventory(&mut self, fields: &Map<String, Value>, path: &str) -> ElementKind {
        let mut location = InventoryLocation::Undefined;
        if let Some(value) = fields.get("location") {
            if let Some(raw) = self.string(value, &join(path, "location")) {
                match raw.parse() {
                    Ok(parsed) => location = parsed,
                    Err(e) => self.warnings.push(e),
                }
            }
        }
        let list = match fields.get("list") {
            Some(value) => self.string(value, &join(path, "list")).unwrap_or_default(),
            None => "",
        };
        let columns = fields.get("columns").and_then(|v| self.count(v, &join(path, "columns")));
        let rows = fields.get("rows").and_then(|v| self.count(v, &join(path, "rows")));
        let (columns, rows) = (columns.unwrap_or(0), rows.unwrap_or(0));
        if columns == 0 || rows == 0 {
            self.warnings.push(ParseWarning::EmptyGrid { columns, rows });
            return ElementKind::Container;
        }
        ElementKind::Inventory(InventoryGrid::new(location, list, columns, rows))
    }

    // ── Fields ───────────────────────────────────────────────────────

    fn style(&mut self, id: NodeId, value: &Value, path: &str) {
        let Some(entries) = value.as_object() else {
            return self.wrong_type(path, "an object");
        };
        let mut style = self.style_of(id);
        for (key, value) in entries {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => {
                    self.wrong_type(&join(path, key), "a string");
                    continue;
                }
            };
            match restyle(&style, key, &text, self.ctx.textures) {
                Ok((updated, applied)) => {
                    style = updated;
                    if let Some(name) = applied.missing_texture {
                        self.warnings.push(ParseWarning::MissingTexture(name));
                    }
                }
                Err(e) => self.warnings.push(e),
            }
        }
        if let Some(element) = self.tree.get_mut(id) {
            element.style = style;
        }
    }

    fn rect(&mut self, id: NodeId, value: &Value, path: &str) {
        let Some(entries) = value.as_object() else {
            return self.wrong_type(path, "an object");
        };
        let Some(mut rect) = self.tree.get(id).map(|element| element.rect) else {
            return;
        };
        for (key, value) in entries {
            let field = join(path, key);
            let slot = match key.as_str() {
                "x0" => &mut rect.x0,
                "y0" => &mut rect.y0,
                "x1" => &mut rect.x1,
                "y1" => &mut rect.y1,
                _ => {
                    self.warnings.push(ParseWarning::UnknownField(field));
                    continue;
                }
            };
            if let Some(n) = self.number(value, &field) {
                *slot = n;
            }
        }
        if let Some(element) = self.tree.get_mut(id) {
            element.rect = rect;
        }
    }

    fn aspect(&mut self, id: NodeId, value: &Value, path: &str) {
        let (Some(x), Some(y)) = (value.get("x"), value.get("y")) else {
            return self.wrong_type(path, "an object with x and y");
        };
        let (Some(x), Some(y)) = (self.number(x, &join(path, "x")), self.number(y, &join(path, "y"))) else {
            return;
        };
        if y == 0.0 {
            return self.warnings.push(ParseWarning::ZeroAspect);
        }
        if let Some(element) = self.tree.get_mut(id) {
            element.aspect = Some(x / y);
        }
    }

    fn bgcolor(&mut self, id: NodeId, value: &Value, path: &str) {
        let Some(raw) = self.string(value, path) else {
            return;
        };
        match raw.parse::<Color>() {
            Ok(color) => {
                if let Some(element) = self.tree.get_mut(id) {
                    element.background = Some(color);
                }
            }
            Err(_) => self.warnings.push(ParseWarning::BadColor(raw.to_owned())),
        }
    }

    fn image(&mut self, id: NodeId, value: &Value, path: &str) {
        let Some(name) = self.string(value, path) else {
            return;
        };
        match self.ctx.textures.texture(name) {
            Some(texture) => {
                if let Some(element) = self.tree.get_mut(id) {
                    element.image = Some(texture);
                }
            }
            None => self.warnings.push(ParseWarning::MissingTexture(name.to_owned())),
        }
    }

    // ── Value helpers ────────────────────────────────────────────────

    fn style_of(&self, id: NodeId) -> Rc<StyleSpec> {
        self.tree
            .get(id)
            .map_or_else(|| self.ctx.default_style.clone(), |element| element.style.clone())
    }

    fn string<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v str> {
        let s = value.as_str();
        if s.is_none() {
            self.wrong_type(path, "a string");
        }
        s
    }

    fn number(&mut self, value: &Value, path: &str) -> Option<f32> {
        let n = value.as_f64().map(|v| v as f32).filter(|v| v.is_finite());
        if n.is_none() {
            self.wrong_type(path, "a number");
        }
        n
    }

    fn count(&mut self, value: &Value, path: &str) -> Option<u32> {
        let n = value.as_u64().and_then(|v| u32::try_from(v).ok());
        if n.is_none() {
            self.wrong_type(path, "a non-negative integer");
        }
        n
    }

    fn wrong_type(&mut self, path: &str, expected: &'static str) {
        self.warnings.push(ParseWarning::WrongType { field: path.to_owned(), expected });
    }
}

/// Dotted field path used in warnings, e.g. `children[0].rect.x0`.
fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::geometry::FracRect;
    use crate::style::TextAlign;
    use crate::testing::{MonospaceFont, TextureMap};

    fn parse(source: &str) -> Result<Parsed, ParseError> {
        let textures = TextureMap::new().with("bg.png", 1).with("btn.png", 3);
        let style = Rc::new(StyleSpec::new(Rc::new(MonospaceFont::default())));
        parse_document(source, &ParseContext::new(&textures, style))
    }

    fn child(parsed: &Parsed, index: usize) -> &Element {
        let root = parsed.tree.root();
        parsed.tree.get(parsed.tree.children(root)[index]).unwrap()
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn minimal_document() {
        let parsed = parse(r##"{"children": [{"bgcolor": "#FF0000", "text": "Hi"}]}"##).unwrap();
        assert!(parsed.warnings.is_empty());
        let node = child(&parsed, 0);
        assert_eq!(node.background, Some(Color::RED));
        assert_eq!(node.text_str(), "Hi");
        assert_eq!(node.rect, FracRect::FULL);
    }

    #[test]
    fn root_fields_apply_to_root() {
        let parsed = parse(r#"{"bgcolor": "black", "children": [{}]}"#).unwrap();
        let root = parsed.tree.get(parsed.tree.root()).unwrap();
        assert_eq!(root.background, Some(Color::BLACK));
    }

    #[test]
    fn nested_children_keep_order() {
        let parsed = parse(
            r#"{"children": [
                {"text": "a", "children": [{"text": "a1"}, {"text": "a2"}]},
                {"text": "b"}
            ]}"#,
        )
        .unwrap();
        let tree = &parsed.tree;
        let [a, b] = tree.children(tree.root()) else {
            panic!("expected two children");
        };
        assert_eq!(tree.get(*b).unwrap().text_str(), "b");
        let texts: Vec<&str> = tree.children(*a).iter().map(|&id| tree.get(id).unwrap().text_str()).collect();
        assert_eq!(texts, vec!["a1", "a2"]);
    }

    #[test]
    fn partial_rect_keeps_defaults() {
        let parsed = parse(r#"{"children": [{"type": "button", "rect": {"x1": 0.5}}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).rect, FracRect::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(child(&parsed, 0).kind.name(), "button");
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(parse("[1, 2]"), Err(ParseError::InvalidRoot)));
        assert!(matches!(parse("{"), Err(ParseError::Json(_))));
        assert!(matches!(parse("{}"), Err(ParseError::EmptyTree)));
        assert!(matches!(parse(r#"{"children": []}"#), Err(ParseError::EmptyTree)));
    }

    // ── Fields ───────────────────────────────────────────────────────

    #[test]
    fn input_text_puts_caret_at_end() {
        let parsed = parse(r#"{"children": [{"text": "héllo", "type": "input"}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).caret(), Some(5));
    }

    #[test]
    fn strings_are_literal() {
        let parsed = parse(r#"{"children": [{"text": "a\\,b"}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).text_str(), r"a\,b");
    }

    #[test]
    fn image_and_aspect() {
        let parsed = parse(r#"{"children": [{"image": "bg.png", "aspect": {"x": 16, "y": 9}}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).image, Some(TextureId(1)));
        assert_eq!(child(&parsed, 0).aspect, Some(16.0 / 9.0));
    }

    #[test]
    fn bad_values_warn_and_keep_defaults() {
        let parsed = parse(
            r#"{"children": [{
                "text": 5,
                "rect": {"x0": "left", "z": 1},
                "bgcolor": "nope",
                "image": "missing.png",
                "aspect": {"x": 1, "y": 0}
            }]}"#,
        )
        .unwrap();
        let node = child(&parsed, 0);
        assert!(node.text.is_none());
        assert_eq!(node.rect, FracRect::FULL);
        assert_eq!(node.background, None);
        assert_eq!(node.image, None);
        assert_eq!(node.aspect, None);
        // serde_json maps are sorted by key.
        assert_eq!(
            parsed.warnings,
            vec![
                ParseWarning::ZeroAspect,
                ParseWarning::BadColor("nope".into()),
                ParseWarning::MissingTexture("missing.png".into()),
                ParseWarning::WrongType { field: "children[0].rect.x0".into(), expected: "a number" },
                ParseWarning::UnknownField("children[0].rect.z".into()),
                ParseWarning::WrongType { field: "children[0].text".into(), expected: "a string" },
            ]
        );
    }

    #[test]
    fn unknown_field_and_kind() {
        let parsed = parse(r#"{"children": [{"type": "slider", "colour": "red"}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).kind, ElementKind::Container);
        assert_eq!(
            parsed.warnings,
            vec![
                ParseWarning::UnknownKind("slider".into()),
                ParseWarning::UnknownField("children[0].colour".into()),
            ]
        );
    }

    #[test]
    fn children_must_be_objects() {
        let parsed = parse(r#"{"children": [1, {"text": "ok"}]}"#).unwrap();
        assert_eq!(parsed.tree.children(parsed.tree.root()).len(), 1);
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning::WrongType { field: "children[0]".into(), expected: "an object" }]
        );
    }

    // ── Inventory ────────────────────────────────────────────────────

    #[test]
    fn inventory_node() {
        let parsed = parse(
            r#"{"children": [{"type": "inventory", "location": "current_player",
                               "list": "main", "columns": 8, "rows": 4}]}"#,
        )
        .unwrap();
        let ElementKind::Inventory(grid) = &child(&parsed, 0).kind else {
            panic!("expected inventory");
        };
        assert_eq!(grid.location, InventoryLocation::CurrentPlayer);
        assert_eq!(grid.list, "main");
        assert_eq!((grid.columns, grid.rows), (8, 4));
    }

    #[test]
    fn type_wins_over_inventory_fields() {
        let parsed = parse(r#"{"children": [{"type": "button", "columns": 3}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).kind.name(), "button");
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning::IgnoredField { field: "children[0].columns".into(), kind: "button" }]
        );
    }

    #[test]
    fn inventory_without_size_stays_container() {
        let parsed = parse(r#"{"children": [{"type": "inventory", "columns": -1, "rows": 2}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).kind, ElementKind::Container);
        assert_eq!(
            parsed.warnings,
            vec![
                ParseWarning::WrongType {
                    field: "children[0].columns".into(),
                    expected: "a non-negative integer"
                },
                ParseWarning::EmptyGrid { columns: 0, rows: 2 },
            ]
        );
    }

    // ── Style ────────────────────────────────────────────────────────

    #[test]
    fn style_inherits_before_children() {
        let parsed = parse(
            r#"{"children": [
                {"style": {"text_align": "left", "inventory_border_width": 3},
                 "children": [{}]},
                {}
            ]}"#,
        )
        .unwrap();
        assert!(parsed.warnings.is_empty());
        let tree = &parsed.tree;
        let styled = tree.children(tree.root())[0];
        let inner = tree.get(tree.children(styled)[0]).unwrap();
        assert_eq!(inner.style.text_align, TextAlign::LEFT);
        assert_eq!(inner.style.border_width, 3);
        assert_eq!(child(&parsed, 1).style.text_align, TextAlign::CENTER);
    }

    #[test]
    fn style_textures() {
        let parsed = parse(r#"{"children": [{"style": {"button_standard": "btn.png"}}]}"#).unwrap();
        assert_eq!(child(&parsed, 0).style.button_standard, Some(TextureId(3)));
    }

    #[test]
    fn missing_style_texture_clears_inherited_skin() {
        let parsed = parse(
            r#"{"style": {"button_hover": "btn.png"},
                "children": [{"type": "button", "style": {"button_hover": "nope.png"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.tree.get(parsed.tree.root()).unwrap().style.button_hover, Some(TextureId(3)));
        assert_eq!(child(&parsed, 0).style.button_hover, None);
        assert_eq!(parsed.warnings, vec![ParseWarning::MissingTexture("nope.png".into())]);
    }

    #[test]
    fn bad_style_entry_warns() {
        let parsed = parse(r#"{"children": [{"style": {"text_align": true, "glow": "1"}}]}"#).unwrap();
        assert_eq!(parsed.warnings.len(), 2);
        assert!(matches!(parsed.warnings[0], ParseWarning::Style(_)));
        assert!(matches!(parsed.warnings[1], ParseWarning::WrongType { .. }));
    }
}
