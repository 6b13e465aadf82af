use anyhow::Result;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::VecDeque;

/// Shading applied to the package color to get the base class color.
const DARK_FACTOR: f64 = -0.05;
/// Lightening applied per inheritance level below the base.
const LIGHT_STEP: f64 = 0.12;

struct ShadePatterns {
    package: Regex,
    class: Regex,
    class_head: Regex,
}

impl ShadePatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            package: Regex::new(r"package\s+([A-Za-z_][\w.]*)\s*#([0-9A-Fa-f]{6})\s*\{")?,
            class: Regex::new(
                r#"(?m)^\s*class\s+(".*?"|\w+)(?:\s*#([0-9A-Fa-f]{6}))?(?:\s+extends\s+(".*?"|\w+))?"#,
            )?,
            class_head: Regex::new(r#"^(\s*class\s+(?:".*?"|\w+))"#)?,
        })
    }
}

/// Darkens (`frac < 0`) or lightens (`frac >= 0`) a `#rrggbb` color.
fn shade_color(hex: &str, frac: f64) -> String {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).unwrap_or(0) as f64;
    let (r, g, b) = (channel(0), channel(2), channel(4));

    let apply = |x: f64| -> u8 {
        let shaded = if frac >= 0.0 {
            x + (255.0 - x) * frac
        } else {
            x * (1.0 + frac)
        };
        (shaded as i64).clamp(0, 255) as u8
    };

    format!("#{:02x}{:02x}{:02x}", apply(r), apply(g), apply(b))
}

/// Index just past the `}` closing the brace that starts at `start_idx`.
fn find_block_end(text: &str, start_idx: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0;
    let mut i = start_idx;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Rewrites every colored `package ... #rrggbb {` block so its classes carry
/// derived colors: classes that others extend get the package color slightly
/// darkened, and each inheritance level below them is progressively
/// lightened. Classes with an explicit color are left untouched, as is all
/// text outside colored package blocks.
pub fn apply(text: &str) -> Result<String> {
    let patterns = ShadePatterns::new()?;
    let mut out = String::new();
    let mut last = 0;

    for caps in patterns.package.captures_iter(text) {
        let m = caps.get(0).unwrap();
        if m.start() < last {
            // Nested package header inside an already rewritten block.
            continue;
        }
        let pkg_color = format!("#{}", &caps[2]);
        let block_end = find_block_end(text, m.end() - 1);
        let block = &text[m.start()..block_end];

        out.push_str(&text[last..m.start()]);
        out.push_str(&shade_block(&patterns, block, &pkg_color));
        last = block_end;
    }

    out.push_str(&text[last..]);
    Ok(out)
}

fn shade_block(patterns: &ShadePatterns, block: &str, pkg_color: &str) -> String {
    struct ClassDecl {
        start: usize,
        end: usize,
        name: String,
        has_color: bool,
    }

    let mut classes = Vec::new();
    let mut edges: IndexMap<String, Vec<String>> = IndexMap::new();

    for cm in patterns.class.captures_iter(block) {
        let whole = cm.get(0).unwrap();
        let name = cm[1].trim_matches('"').to_string();
        let parent = cm.get(3).map(|p| p.as_str().trim_matches('"').to_string());

        if let Some(parent) = parent {
            edges.entry(parent).or_default().push(name.clone());
        }
        classes.push(ClassDecl {
            start: whole.start(),
            end: whole.end(),
            name,
            has_color: cm.get(2).is_some(),
        });
    }

    // Roots of the extends forest share one darkened base color; descendants
    // lighten one step per level.
    let parent_color = shade_color(pkg_color, DARK_FACTOR);
    let mut colors: IndexMap<String, String> = IndexMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    for parent in edges.keys() {
        colors.entry(parent.clone()).or_insert_with(|| parent_color.clone());
        queue.push_back(parent.clone());
    }
    while let Some(current) = queue.pop_front() {
        let current_color = colors[&current].clone();
        for child in edges.get(&current).cloned().unwrap_or_default() {
            if !colors.contains_key(&child) {
                colors.insert(child.clone(), shade_color(&current_color, LIGHT_STEP));
                queue.push_back(child);
            }
        }
    }

    let mut rewritten = String::new();
    let mut block_last = 0;
    for decl in &classes {
        rewritten.push_str(&block[block_last..decl.start]);
        let line = &block[decl.start..decl.end];
        if let Some(color) = colors.get(&decl.name) {
            if !decl.has_color {
                rewritten.push_str(
                    &patterns
                        .class_head
                        .replace(line, |caps: &regex::Captures| {
                            format!("{} {}", &caps[1], color)
                        }),
                );
                block_last = decl.end;
                continue;
            }
        }
        rewritten.push_str(line);
        block_last = decl.end;
    }
    rewritten.push_str(&block[block_last..]);
    rewritten
}
