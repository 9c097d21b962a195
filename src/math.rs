//! Typesetting of inline math markup for the terminal.
//!
//! Documents may contain LaTeX between `$` or `$$` delimiters. A terminal
//! cannot render it, so the UI passes every displayed string through a
//! [`Typesetter`] after each state change.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub trait Typesetter {
    fn typeset<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Which typesetter the UI should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathMode {
    #[default]
    Unicode,
    Plain,
}

impl MathMode {
    pub fn typesetter(self) -> Box<dyn Typesetter> {
        match self {
            MathMode::Unicode => Box::new(UnicodeMath),
            MathMode::Plain => Box::new(PlainText),
        }
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Typesetter for PlainText {
    fn typeset<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Rewrites common LaTeX inside `$...$` spans as Unicode text.
///
/// Commands it does not know are kept verbatim, minus the delimiters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeMath;

static MATH_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$(.+?)\$\$|\$(.+?)\$").expect("math span pattern"));
static FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[dt]?frac\{([^{}]*)\}\{([^{}]*)\}").expect("fraction pattern")
});
static SQUARE_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\sqrt\{([^{}]*)\}").expect("square root pattern"));
static BRACED_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\^_])\{([^{}]*)\}").expect("braced script pattern"));
static BARE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\^_])([0-9a-zA-Z+\-])").expect("bare script pattern"));
static MATRIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\{1,2}begin\{[a-zA-Z]*matrix\}(.*?)\\{1,2}end\{[a-zA-Z]*matrix\}")
        .expect("matrix pattern")
});
static ENVIRONMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\{1,2}(?:begin|end)\{[a-zA-Z*]*\}").expect("environment pattern")
});
static ROW_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\\{2,}\s*").expect("row break pattern"));
static ESCAPED_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\\([a-zA-Z])").expect("escaped command pattern"));
static COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([a-zA-Z]+)").expect("command pattern"));

const SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("Delta", "Δ"),
    ("epsilon", "ε"),
    ("theta", "θ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("pi", "π"),
    ("sigma", "σ"),
    ("Sigma", "Σ"),
    ("phi", "φ"),
    ("omega", "ω"),
    ("Omega", "Ω"),
    ("infty", "∞"),
    ("pm", "±"),
    ("mp", "∓"),
    ("times", "×"),
    ("cdot", "·"),
    ("div", "÷"),
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("rightarrow", "→"),
    ("to", "→"),
    ("leftarrow", "←"),
    ("Rightarrow", "⇒"),
    ("in", "∈"),
    ("notin", "∉"),
    ("subset", "⊂"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("forall", "∀"),
    ("exists", "∃"),
    ("circ", "°"),
    ("degree", "°"),
    ("ln", "ln"),
    ("log", "log"),
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("lim", "lim"),
    ("left", ""),
    ("right", ""),
];

impl Typesetter for UnicodeMath {
    fn typeset<'a>(&self, text: &'a str) -> Cow<'a, str> {
        MATH_SPAN.replace_all(text, |caps: &Captures| {
            let body = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            typeset_math(body)
        })
    }
}

fn typeset_math(body: &str) -> String {
    let out = MATRIX.replace_all(body, |caps: &Captures| matrix(&caps[1]));
    let out = ENVIRONMENT.replace_all(&out, "");
    let out = ESCAPED_COMMAND.replace_all(&out, r"\$1");
    let mut out = ROW_BREAK.replace_all(&out, "; ").into_owned();
    // Innermost groups first so nested fractions and roots collapse outward.
    loop {
        let next = FRACTION.replace_all(&out, |caps: &Captures| {
            format!("{}/{}", group(&caps[1]), group(&caps[2]))
        });
        let next = SQUARE_ROOT
            .replace_all(&next, |caps: &Captures| format!("√{}", group(&caps[1])))
            .into_owned();
        if next == out {
            break;
        }
        out = next;
    }

    let out = BRACED_SCRIPT.replace_all(&out, |caps: &Captures| script(&caps[1], &caps[2]));
    let out = BARE_SCRIPT.replace_all(&out, |caps: &Captures| script(&caps[1], &caps[2]));
    COMMAND
        .replace_all(&out, |caps: &Captures| {
            SYMBOLS
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[1].to_string(), |(_, symbol)| symbol.to_string())
        })
        .trim()
        .to_string()
}

/// Writes matrix rows as `[a b; c d]`.
fn matrix(body: &str) -> String {
    let rows: Vec<String> = ROW_BREAK
        .split(body)
        .map(|row| {
            row.split('&')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|row| !row.is_empty())
        .collect();
    format!("[{}]", rows.join("; "))
}

/// Parenthesizes `body` unless it is a single word or number.
fn group(body: &str) -> String {
    if !body.is_empty() && body.chars().all(char::is_alphanumeric) {
        body.to_string()
    } else {
        format!("({body})")
    }
}

fn script(kind: &str, body: &str) -> String {
    let mapped: Option<String> = body
        .chars()
        .map(|c| {
            if kind == "^" {
                superscript(c)
            } else {
                subscript(c)
            }
        })
        .collect();
    mapped.unwrap_or_else(|| format!("{kind}({body})"))
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        'x' => 'ˣ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        'n' => 'ₙ',
        'i' => 'ᵢ',
        'x' => 'ₓ',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(PlainText.typeset("$x^2$"), "$x^2$");
        assert!(matches!(UnicodeMath.typeset("no math here"), Cow::Borrowed(_)));
    }

    #[test]
    fn symbols_and_scripts() {
        assert_eq!(UnicodeMath.typeset("area $A = \\pi r^2$"), "area A = π r²");
        assert_eq!(UnicodeMath.typeset("$x_1 + x_{10}$"), "x₁ + x₁₀");
        assert_eq!(UnicodeMath.typeset("$e^{\\ln(5)}$"), "e^(ln(5))");
    }

    #[test]
    fn fractions_and_roots() {
        assert_eq!(UnicodeMath.typeset("$\\frac{1}{2}$"), "1/2");
        assert_eq!(UnicodeMath.typeset("$\\sqrt{25} = 5$"), "√25 = 5");
        assert_eq!(
            UnicodeMath.typeset("$\\frac{n(n+1)}{2}$"),
            "(n(n+1))/2"
        );
        assert_eq!(UnicodeMath.typeset("$\\frac{\\sqrt{3}}{2}$"), "(√3)/2");
    }

    #[test]
    fn display_math_and_escaped_backslashes() {
        assert_eq!(UnicodeMath.typeset("$$a \\times b$$"), "a × b");
        assert_eq!(UnicodeMath.typeset("$$a \\\\times b$$"), "a × b");
    }

    #[test]
    fn matrices_become_bracketed_rows() {
        assert_eq!(
            UnicodeMath.typeset("det $\\begin{pmatrix} 2 & 1 \\\\ 3 & 4 \\end{pmatrix}$?"),
            "det [2 1; 3 4]?"
        );
        assert_eq!(
            UnicodeMath.typeset("$\\begin{bmatrix} a & b \\\\ c & d \\\\ \\end{bmatrix}$"),
            "[a b; c d]"
        );
    }

    #[test]
    fn other_environments_lose_their_wrappers() {
        assert_eq!(
            UnicodeMath.typeset("$\\begin{aligned} x = 1 \\\\ y = 2 \\end{aligned}$"),
            "x = 1; y = 2"
        );
    }

    #[test]
    fn unknown_commands_keep_their_name() {
        assert_eq!(UnicodeMath.typeset("$\\mathbb{R}$"), "mathbb{R}");
    }
}
