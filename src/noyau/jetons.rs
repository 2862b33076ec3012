// src/noyau/jetons.rs
//
// Tokenisation : texte du pavé (glyphes d’affichage) -> jetons typés.
// Aucune substitution de texte : chaque glyphe est reconnu tel quel,
// π et e restent des constantes (valeur résolue à l’évaluation).

use super::erreur::LexError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Glyphe d’affichage (celui du pavé).
    pub fn glyphe(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "−",
            Operator::Mul => "×",
            Operator::Div => "÷",
            Operator::Pow => "^",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log10,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Reciprocal,
    Factorial,
    Exp,
    TenPowX,
    Percent,
    NegativeSign,
}

impl Function {
    /// Postfixée = s’applique à l’opérande qui la précède (x², x!, 5%).
    pub fn est_postfixe(self) -> bool {
        matches!(
            self,
            Function::Square
                | Function::Cube
                | Function::Reciprocal
                | Function::Factorial
                | Function::Percent
        )
    }

    pub fn glyphe(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Ln => "ln",
            Function::Log10 => "log₁₀",
            Function::Sqrt => "√",
            Function::Cbrt => "∛",
            Function::Square => "²",
            Function::Cube => "³",
            Function::Reciprocal => "⁻¹",
            Function::Factorial => "!",
            Function::Exp => "exp",
            Function::TenPowX => "10ˣ",
            Function::Percent => "%",
            Function::NegativeSign => "neg",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn glyphe(self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operator),
    Fonction(Function),
    Constante(Constant),
    LPar,
    RPar,
}

/// Table des symboles (hors nombres). La plus longue correspondance gagne,
/// donc l’ordre n’a pas d’importance : "sinh" bat "sin", "exp" bat "e", "²√" bat "²".
const SYMBOLES: &[(&str, Tok)] = &[
    // opérateurs
    ("+", Tok::Op(Operator::Add)),
    ("-", Tok::Op(Operator::Sub)),
    ("−", Tok::Op(Operator::Sub)),
    ("*", Tok::Op(Operator::Mul)),
    ("×", Tok::Op(Operator::Mul)),
    ("/", Tok::Op(Operator::Div)),
    ("÷", Tok::Op(Operator::Div)),
    ("^", Tok::Op(Operator::Pow)),
    ("xʸ", Tok::Op(Operator::Pow)),
    // fonctions préfixées
    ("sin", Tok::Fonction(Function::Sin)),
    ("cos", Tok::Fonction(Function::Cos)),
    ("tan", Tok::Fonction(Function::Tan)),
    ("sinh", Tok::Fonction(Function::Sinh)),
    ("cosh", Tok::Fonction(Function::Cosh)),
    ("tanh", Tok::Fonction(Function::Tanh)),
    ("ln", Tok::Fonction(Function::Ln)),
    ("log", Tok::Fonction(Function::Log10)),
    ("log₁₀", Tok::Fonction(Function::Log10)),
    ("sqrt", Tok::Fonction(Function::Sqrt)),
    ("√", Tok::Fonction(Function::Sqrt)),
    ("²√", Tok::Fonction(Function::Sqrt)),
    ("cbrt", Tok::Fonction(Function::Cbrt)),
    ("∛", Tok::Fonction(Function::Cbrt)),
    ("³√", Tok::Fonction(Function::Cbrt)),
    ("exp", Tok::Fonction(Function::Exp)),
    ("eˣ", Tok::Fonction(Function::Exp)),
    ("10ˣ", Tok::Fonction(Function::TenPowX)),
    ("neg", Tok::Fonction(Function::NegativeSign)),
    // fonctions postfixées
    ("²", Tok::Fonction(Function::Square)),
    ("³", Tok::Fonction(Function::Cube)),
    ("⁻¹", Tok::Fonction(Function::Reciprocal)),
    ("!", Tok::Fonction(Function::Factorial)),
    ("%", Tok::Fonction(Function::Percent)),
    // constantes
    ("π", Tok::Constante(Constant::Pi)),
    ("pi", Tok::Constante(Constant::Pi)),
    ("e", Tok::Constante(Constant::E)),
    // parenthèses
    ("(", Tok::LPar),
    (")", Tok::RPar),
];

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 0.5, .5, 5.) et notation scientifique (1.5E-7)
/// - opérateurs + − × ÷ ^ (et leurs formes ASCII - * /)
/// - fonctions préfixées (sin, √, log₁₀, 10ˣ…) et postfixées (², ³, ⁻¹, !, %)
/// - constantes π / pi / e
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Symboles : avant les nombres ("10ˣ" commence par des chiffres)
        if let Some((longueur, tok)) = plus_longue_correspondance(&chars, i) {
            out.push(tok);
            i += longueur;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (valeur, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(valeur));
            i = fin;
            continue;
        }

        return Err(LexError::CaractereInattendu { c, pos: i });
    }

    Ok(out)
}

fn plus_longue_correspondance(chars: &[char], i: usize) -> Option<(usize, Tok)> {
    let mut meilleur: Option<(usize, Tok)> = None;
    for (motif, tok) in SYMBOLES {
        if let Some(n) = correspond(chars, i, motif) {
            if meilleur.map_or(true, |(m, _)| n > m) {
                meilleur = Some((n, *tok));
            }
        }
    }
    meilleur
}

/// Longueur (en chars) si `motif` commence à la position `i`.
/// Les noms ASCII de deux lettres ou plus sont insensibles à la casse ("SIN", "Pi").
fn correspond(chars: &[char], i: usize, motif: &str) -> Option<usize> {
    let n = motif.chars().count();
    if i + n > chars.len() {
        return None;
    }
    let nom_ascii = n >= 2 && motif.chars().all(|c| c.is_ascii_alphabetic());
    let ok = motif.chars().zip(&chars[i..]).all(|(a, b)| {
        if nom_ascii {
            a.eq_ignore_ascii_case(b)
        } else {
            a == *b
        }
    });
    ok.then_some(n)
}

/// Lit un littéral décimal à partir de `debut` (chiffres, un seul point, exposant `E`).
/// Retourne (valeur, position après le littéral).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), LexError> {
    let mut i = debut;
    let mut point = false;
    let mut chiffres = 0usize;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            if point {
                return Err(LexError::PointsMultiples { pos: i });
            }
            point = true;
        } else {
            chiffres += 1;
        }
        i += 1;
    }

    if chiffres == 0 {
        return Err(LexError::NombreInvalide { pos: debut });
    }

    // Exposant : E, signe optionnel, chiffres obligatoires
    if i < chars.len() && chars[i] == 'E' {
        let pos_e = i;
        i += 1;
        if i < chars.len() && matches!(chars[i], '+' | '-' | '−') {
            i += 1;
        }
        let debut_exp = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i == debut_exp {
            return Err(LexError::ExposantIncomplet { pos: pos_e });
        }
    }

    let texte: String = chars[debut..i]
        .iter()
        .map(|&c| if c == '−' { '-' } else { c })
        .collect();
    let valeur = texte
        .parse::<f64>()
        .map_err(|_| LexError::NombreInvalide { pos: debut })?;

    Ok((valeur, i))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(op) => op.glyphe().to_string(),
            Tok::Fonction(f) => f.glyphe().to_string(),
            Tok::Constante(k) => k.glyphe().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
