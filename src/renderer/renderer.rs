use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::options::{escape_attr, escape_html, sanitize_class_list, MenuOptions, OptionDefaults, RawOptions};
use crate::renderer::traits::{MenuExtension, RenderContext};
use crate::taxonomy::{Term, TermId};

/// Recursive tree-to-markup renderer over a flat term list.
///
/// The list is grouped once into a parent-id → ordered-child-index map, so
/// the render walk touches each term at most once instead of rescanning the
/// whole list per level. Sibling order is the list order.
pub struct MenuRenderer<'a> {
    terms: &'a [Term],
    options: &'a MenuOptions,
    children: HashMap<&'a TermId, Vec<usize>>,
    roots: Vec<usize>,
    depth_ceiling: usize,
}

impl<'a> MenuRenderer<'a> {
    pub fn new(terms: &'a [Term], options: &'a MenuOptions) -> Self {
        let ids: HashSet<&TermId> = terms.iter().map(|t| &t.id).collect();
        let mut children: HashMap<&TermId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (index, term) in terms.iter().enumerate() {
            // A parent id that never appears in the list demotes the term
            // to top level rather than dropping it.
            match term.parent_key().filter(|p| ids.contains(*p)) {
                Some(parent) => children.entry(parent).or_default().push(index),
                None => roots.push(index),
            }
        }
        // "Unlimited" still gets a ceiling. An acyclic chain over n terms is
        // at most n deep, so this only ever cuts off recursion that
        // duplicate ids would otherwise make circular. Terms on a parent
        // cycle are unreachable from the roots to begin with: each term
        // sits in exactly one child list.
        let depth_ceiling = options.max_depth.unwrap_or_else(|| terms.len().max(1));
        Self {
            terms,
            options,
            children,
            roots,
            depth_ceiling,
        }
    }

    /// Render the whole menu, with every link prefixed by `base_link`.
    /// Returns the empty string when nothing is left to render.
    pub fn render(&self, base_link: &str) -> String {
        debug!(
            terms = self.terms.len(),
            roots = self.roots.len(),
            "rendering menu"
        );
        let mut out = String::new();
        self.render_level(&mut out, &self.roots, base_link, &RenderContext::new());
        out
    }

    fn render_level(&self, out: &mut String, level: &[usize], path: &str, context: &RenderContext) {
        let tab = if self.options.line_ending.is_empty() {
            String::new()
        } else {
            context.indent()
        };

        for &index in level {
            let term = &self.terms[index];
            if self.options.exclude.contains(&term.id) {
                continue;
            }

            let item_path = format!("{}/{}", path, term.slug);
            let sub = if context.depth + 1 < self.depth_ceiling {
                match self.children.get(&term.id) {
                    Some(kids) => {
                        let mut sub = String::new();
                        self.render_level(
                            &mut sub,
                            kids,
                            &item_path,
                            &context.with_depth(context.depth + 1),
                        );
                        sub
                    }
                    None => String::new(),
                }
            } else {
                String::new()
            };

            self.render_item(out, term, &sub, &item_path, &tab);
        }
    }

    /// Emit one item: item tag, optional before-fragment, anchor with the
    /// escaped display name, optional after-fragment, optional children
    /// wrapper, closing item tag. The fragments and the wrapper only appear
    /// when the item actually rendered children.
    fn render_item(&self, out: &mut String, term: &Term, sub: &str, item_path: &str, tab: &str) {
        let opts = self.options;
        let nl = &opts.line_ending;

        if !opts.child_tag.is_empty() {
            let class_list = self.item_classes(term, !sub.is_empty());
            out.push_str(tab);
            out.push('<');
            out.push_str(&opts.child_tag);
            if !class_list.is_empty() {
                out.push_str(&format!(" class=\"{}\"", class_list));
            }
            out.push('>');
            out.push_str(nl);
        }

        if !sub.is_empty() && !opts.before_children.is_empty() {
            out.push_str(tab);
            out.push_str(&opts.before_children);
            out.push_str(nl);
        }

        out.push_str(tab);
        out.push_str(&format!(
            "<a{} href=\"{}\">",
            opts.link_class_attr,
            self.link_target(item_path)
        ));
        out.push_str(nl);
        out.push_str(tab);
        out.push_str(&escape_html(&term.name));
        out.push_str(nl);
        out.push_str(tab);
        out.push_str("</a>");
        out.push_str(nl);

        if !sub.is_empty() && !opts.after_children.is_empty() {
            out.push_str(tab);
            out.push_str(&opts.after_children);
            out.push_str(nl);
        }

        if !sub.is_empty() {
            if !opts.parent_tag.is_empty() {
                out.push_str(tab);
                out.push('<');
                out.push_str(&opts.parent_tag);
                if !opts.parent_class.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", opts.parent_class));
                }
                out.push('>');
                out.push_str(nl);
            }
            out.push_str(sub);
            if !opts.parent_tag.is_empty() {
                out.push_str(tab);
                out.push_str("</");
                out.push_str(&opts.parent_tag);
                out.push('>');
                out.push_str(nl);
            }
        }

        if !opts.child_tag.is_empty() {
            out.push_str(tab);
            out.push_str("</");
            out.push_str(&opts.child_tag);
            out.push('>');
            out.push_str(nl);
        }
    }

    /// Item class list: base class, has-children class iff children
    /// rendered, id-derived class if configured. Empty tokens are omitted;
    /// an empty list omits the attribute.
    fn item_classes(&self, term: &Term, has_children: bool) -> String {
        let opts = self.options;
        let mut classes: Vec<String> = Vec::new();
        if !opts.child_class.is_empty() {
            classes.push(opts.child_class.clone());
        }
        if has_children && !opts.child_has_children_class.is_empty() {
            classes.push(opts.child_has_children_class.clone());
        }
        if opts.child_id_class {
            let token = sanitize_class_list(&format!("item-{}", term.id));
            if !token.is_empty() {
                classes.push(token);
            }
        }
        classes.join(" ")
    }

    fn link_target(&self, item_path: &str) -> String {
        if self.options.link_query.is_empty() {
            format!("{}/", item_path)
        } else {
            format!("{}/?{}", item_path, escape_attr(&self.options.link_query))
        }
    }
}

/// Top-level entry point: normalize raw options, consult the extension
/// seam, and fall back to the built-in renderer.
///
/// `base_link` is the precomputed site root plus taxonomy path segment;
/// permalink structure is the caller's business.
pub fn render_menu(
    terms: &[Term],
    raw: &RawOptions,
    base_link: &str,
    extension: Option<&dyn MenuExtension>,
) -> String {
    let mut defaults = OptionDefaults::base();
    if let Some(ext) = extension {
        ext.extend_defaults(&mut defaults);
    }
    let extended = defaults.is_extended();
    let options = MenuOptions::from_raw(raw, &defaults);

    if let Some(ext) = extension {
        if let Some(html) = ext.custom_render(terms, &options, base_link) {
            return html;
        }
        if extended {
            if let Some(html) = ext.default_render(terms, &options, base_link) {
                return html;
            }
        }
    }

    MenuRenderer::new(terms, &options).render(base_link)
}
