//! Tag-stream front end.
//!
//! A formspec is a sequence of `name[description]` tags. `beginrect` and
//! `endrect` bracket an element; every other tag modifies the element on top
//! of the stack. Elements are attached to their parent when they are closed,
//! so siblings keep source order.

use tracing::debug;

use crate::dom::{ButtonState, Element, ElementKind, ElementTree, InputState, InventoryGrid, NodeId};
use crate::geometry::FracRect;
use crate::style::{restyle, Color};
use crate::text::unescape;

use super::tokenizer::{fragments, split_unescaped, Token};
use super::{finish, ParseContext, ParseError, ParseWarning, Parsed, Warnings};

/// Parse a tag-stream formspec.
pub fn parse_tags(source: &str, ctx: &ParseContext<'_>) -> Result<Parsed, ParseError> {
    let mut parser = TagParser::new(ctx);
    for fragment in fragments(source) {
        parser.fragment(fragment)?;
    }
    parser.finish()
}

struct TagParser<'a, 'c> {
    ctx: &'a ParseContext<'c>,
    tree: ElementTree,
    stack: Vec<NodeId>,
    warnings: Warnings,
}

impl<'a, 'c> TagParser<'a, 'c> {
    fn new(ctx: &'a ParseContext<'c>) -> Self {
        let tree = ElementTree::new(Element::new(ctx.default_style.clone()));
        let stack = vec![tree.root()];
        Self { ctx, tree, stack, warnings: Warnings::default() }
    }

    /// Element the current tag applies to.
    fn top(&mut self) -> Option<&mut Element> {
        let id = *self.stack.last()?;
        self.tree.get_mut(id)
    }

    fn fragment(&mut self, fragment: &str) -> Result<(), ParseError> {
        if fragment.trim().is_empty() {
            return Ok(());
        }
        let mut parts = split_unescaped(fragment, Token::Open);
        if parts.len() < 2 {
            return Ok(());
        }
        let name = parts.first().copied().unwrap_or_default().trim();
        let description = if parts.len() > 2 {
            if name != "image" {
                self.warnings.push(ParseWarning::MalformedTag(fragment.trim().to_owned()));
                return Ok(());
            }
            // Texture modifiers may contain `[`.
            let joined = parts.split_off(1).join("[");
            joined.trim().to_owned()
        } else {
            parts[1].trim().to_owned()
        };

        match name {
            "beginrect" => self.begin_rect(&description),
            "endrect" => return self.end_rect(),
            "bgcolor" => self.bgcolor(&description),
            "inventory" => self.inventory(&description),
            "button" => self.promote(ElementKind::Button(ButtonState::default())),
            "input" => self.promote(ElementKind::Input(InputState::default())),
            "text" => {
                if let Some(top) = self.top() {
                    top.set_text(unescape(&description));
                }
            }
            "image" => self.image(&description),
            "aspect" => self.aspect(&description),
            "style" => self.style(&description),
            other => self.warnings.push(ParseWarning::UnknownTag(other.to_owned())),
        }
        Ok(())
    }

    fn finish(self) -> Result<Parsed, ParseError> {
        if self.stack.len() != 1 {
            return Err(ParseError::UnclosedRect { depth: self.stack.len().saturating_sub(1) });
        }
        debug!(nodes = self.tree.len(), "parsed tag stream");
        finish(self.tree, self.warnings)
    }

    // ── Tags ─────────────────────────────────────────────────────────

    fn begin_rect(&mut self, description: &str) {
        let style = match self.top() {
            Some(parent) => parent.style.clone(),
            None => self.ctx.default_style.clone(),
        };
        let mut element = Element::new(style);
        let args = args(description);
        if args.len() < 4 {
            self.warnings.push(ParseWarning::ArgumentCount {
                tag: "beginrect",
                expected: "4",
                found: args.len(),
            });
        } else {
            match parse_floats::<4>("beginrect", &args) {
                Ok([x0, y0, x1, y1]) => element.rect = FracRect::new(x0, y0, x1, y1),
                Err(warning) => self.warnings.push(warning),
            }
        }
        // The element is pushed even when its rect is unusable, so the
        // matching endrect still pairs up.
        let id = self.tree.insert_detached(element);
        self.stack.push(id);
    }

    fn end_rect(&mut self) -> Result<(), ParseError> {
        if self.stack.len() <= 1 {
            return Err(ParseError::UnmatchedEndRect);
        }
        let (Some(child), Some(&parent)) = (self.stack.pop(), self.stack.last()) else {
            return Err(ParseError::UnmatchedEndRect);
        };
        self.tree.append_child(parent, child);
        Ok(())
    }

    fn bgcolor(&mut self, description: &str) {
        let value = args(description).into_iter().next().unwrap_or_default();
        match value.parse::<Color>() {
            Ok(color) => {
                if let Some(top) = self.top() {
                    top.background = Some(color);
                }
            }
            Err(_) => self.warnings.push(ParseWarning::BadColor(value)),
        }
    }

    fn inventory(&mut self, description: &str) {
        let args = args(description);
        if args.len() < 5 {
            self.warnings.push(ParseWarning::ArgumentCount {
                tag: "inventory",
                expected: "5",
                found: args.len(),
            });
            return;
        }
        let location = match args[0].parse() {
            Ok(location) => location,
            Err(e) => return self.warnings.push(e),
        };
        let (columns, rows) = match (parse_count(&args[2]), parse_count(&args[3])) {
            (Some(c), Some(r)) => (c, r),
            (None, _) => return self.bad_number("inventory", &args[2]),
            (_, None) => return self.bad_number("inventory", &args[3]),
        };
        if columns == 0 || rows == 0 {
            return self.warnings.push(ParseWarning::EmptyGrid { columns, rows });
        }
        let grid = InventoryGrid::new(location, args[1].trim(), columns, rows);
        self.promote(ElementKind::Inventory(grid));
    }

    fn promote(&mut self, kind: ElementKind) {
        if let Some(Err(e)) = self.top().map(|top| top.promote(kind)) {
            self.warnings.push(e);
        }
    }

    fn image(&mut self, description: &str) {
        let name = unescape(description);
        match self.ctx.textures.texture(&name) {
            Some(texture) => {
                if let Some(top) = self.top() {
                    top.image = Some(texture);
                }
            }
            None => self.warnings.push(ParseWarning::MissingTexture(name)),
        }
    }

    fn aspect(&mut self, description: &str) {
        let args = args(description);
        if args.len() != 2 {
            return self.warnings.push(ParseWarning::ArgumentCount {
                tag: "aspect",
                expected: "exactly 2",
                found: args.len(),
            });
        }
        match parse_floats::<2>("aspect", &args) {
            Ok([_, h]) if h == 0.0 => self.warnings.push(ParseWarning::ZeroAspect),
            Ok([w, h]) => {
                if let Some(top) = self.top() {
                    top.aspect = Some(w / h);
                }
            }
            Err(warning) => self.warnings.push(warning),
        }
    }

    fn style(&mut self, description: &str) {
        let args = args(description);
        if args.len() < 2 {
            return self.warnings.push(ParseWarning::ArgumentCount {
                tag: "style",
                expected: "2",
                found: args.len(),
            });
        }
        let textures = self.ctx.textures;
        let Some(top) = self.top() else {
            return;
        };
        match restyle(&top.style, &args[0], &args[1], textures) {
            Ok((style, applied)) => {
                top.style = style;
                if let Some(name) = applied.missing_texture {
                    self.warnings.push(ParseWarning::MissingTexture(name));
                }
            }
            Err(e) => self.warnings.push(e),
        }
    }

    fn bad_number(&mut self, tag: &'static str, value: &str) {
        self.warnings.push(ParseWarning::BadNumber { tag, value: value.to_owned() });
    }
}

/// Comma-separated, escape-decoded arguments.
fn args(description: &str) -> Vec<String> {
    split_unescaped(description, Token::Comma).into_iter().map(unescape).collect()
}

fn parse_floats<const N: usize>(tag: &'static str, args: &[String]) -> Result<[f32; N], ParseWarning> {
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseWarning::BadNumber { tag, value: arg.clone() })?;
    }
    Ok(out)
}

fn parse_count(arg: &str) -> Option<u32> {
    arg.trim().parse().ok()
}

// ===========================================================================
// Tests
// ===========================================================================
