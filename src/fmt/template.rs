//! printf-style template resolution for the `*f` logging variants.
//!
//! Arguments arrive as `&dyn Display`, so verbs can only inspect the rendered
//! text. Numeric verbs parse it back; anything that does not fit the verb is
//! rendered as `%!<verb>(<value>)` instead of failing the log call.

use regex::{Captures, Regex};
use std::fmt::{Display, Write};
use std::sync::LazyLock;

/// Flags, width, precision, verb. `%%` is matched as a verb too.
static VERB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([-+# 0]*)(\d+)?(?:\.(\d+))?([a-zA-Z%])").expect("Invalid verb regex")
});

/// Upper bound for width and precision taken from a template.
const MAX_PAD: usize = 4096;

/// Resolves a template against its arguments.
///
/// - no arguments: the template is returned verbatim
/// - empty template: the arguments' `Display` forms are concatenated
/// - otherwise each verb consumes one argument
///
/// ```
/// use splitlog::fmt::resolve;
///
/// assert_eq!(resolve("", &[&"a", &1, &true]), "a1true");
/// assert_eq!(resolve("%s-%d", &[&"x", &2]), "x-2");
/// ```
#[must_use]
pub fn resolve(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    if template.is_empty() {
        return args.iter().fold(String::new(), |mut acc, arg| {
            let _ = write!(acc, "{arg}");
            acc
        });
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = args.iter();
    let mut last = 0;

    for caps in VERB_REGEX.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        let spec = Spec::from_captures(&caps);
        if spec.verb == '%' {
            out.push('%');
            continue;
        }

        match next_arg.next() {
            Some(arg) => out.push_str(&spec.render(&arg.to_string())),
            None => {
                let _ = write!(out, "%!{}(MISSING)", spec.verb);
            }
        }
    }
    out.push_str(&template[last..]);

    let extra: Vec<String> = next_arg.map(ToString::to_string).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

/// One parsed verb.
#[derive(Debug, Clone, Copy)]
struct Spec {
    left_align: bool,
    zero_pad: bool,
    plus: bool,
    alternate: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Spec {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let flags = caps.get(1).map_or("", |m| m.as_str());
        let number = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .map(|n| n.min(MAX_PAD))
        };
        Self {
            left_align: flags.contains('-'),
            zero_pad: flags.contains('0'),
            plus: flags.contains('+'),
            alternate: flags.contains('#'),
            width: number(2),
            precision: number(3),
            verb: caps
                .get(4)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('v'),
        }
    }

    fn render(&self, value: &str) -> String {
        let body = match self.verb {
            'v' => value.to_string(),
            's' => self.precision.map_or_else(
                || value.to_string(),
                |p| value.chars().take(p).collect(),
            ),
            'd' => match value.trim().parse::<i128>() {
                Ok(n) if self.plus && n >= 0 => format!("+{n}"),
                Ok(n) => n.to_string(),
                Err(_) => return self.bad(value),
            },
            'f' | 'F' => match value.trim().parse::<f64>() {
                Ok(n) => {
                    let p = self.precision.unwrap_or(6);
                    if self.plus && n >= 0.0 {
                        format!("+{n:.p$}")
                    } else {
                        format!("{n:.p$}")
                    }
                }
                Err(_) => return self.bad(value),
            },
            't' => match value {
                "true" | "false" => value.to_string(),
                _ => return self.bad(value),
            },
            'q' => format!("{value:?}"),
            'x' | 'X' => {
                let hex = hex(value, self.verb == 'X');
                if self.alternate {
                    format!("0{}{hex}", self.verb)
                } else {
                    hex
                }
            }
            _ => return self.bad(value),
        };
        self.pad(body)
    }

    fn bad(&self, value: &str) -> String {
        format!("%!{}({value})", self.verb)
    }

    fn pad(&self, body: String) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let fill = width - len;
        if self.left_align {
            format!("{body}{}", " ".repeat(fill))
        } else if self.zero_pad && matches!(self.verb, 'd' | 'f' | 'F' | 'x' | 'X') {
            // Zeros go after the sign.
            let (sign, digits) = match body.strip_prefix(['-', '+']) {
                Some(rest) => (&body[..1], rest),
                None => ("", body.as_str()),
            };
            format!("{sign}{}{digits}", "0".repeat(fill))
        } else {
            format!("{}{body}", " ".repeat(fill))
        }
    }
}

/// Integers render as numbers, everything else as the hex of its bytes.
fn hex(value: &str, upper: bool) -> String {
    let encoded = value.trim().parse::<i128>().map_or_else(
        |_| value.bytes().fold(String::new(), |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        }),
        |n| {
            if n < 0 {
                format!("-{:x}", n.unsigned_abs())
            } else {
                format!("{n:x}")
            }
        },
    );
    if upper {
        encoded.to_uppercase()
    } else {
        encoded
    }
}
