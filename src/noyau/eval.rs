//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> évaluation f64 (mode d’angle lu à l’appel)
//!
//! Toute opération indéfinie ou non finie devient une `DomainError` :
//! jamais d’infini ni de NaN en sortie.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::erreur::{CalcError, DomainError, SyntaxError};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize, Constant, Function, Operator};
use super::rpn::{format_rpn, from_rpn, to_rpn};
use super::trig::{trig, AngleMode, TrigFn};

/// Plus grand n tel que n! reste fini en double précision.
pub const FACTORIELLE_MAX: u32 = 170;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

pub fn valeur_constante(k: Constant) -> f64 {
    match k {
        Constant::Pi => std::f64::consts::PI,
        Constant::E => std::f64::consts::E,
    }
}

/// Évalue un arbre. Pur : ne modifie rien, même résultat à chaque appel.
pub fn evaluate(expr: &Expr, mode: AngleMode) -> Result<f64, DomainError> {
    match expr {
        Expr::Literal(v) => fini(*v),
        Expr::Constante(k) => Ok(valeur_constante(*k)),
        Expr::UnaryOp(f, x) => apply_function(*f, evaluate(x, mode)?, mode),
        Expr::BinaryOp(op, a, b) => apply_operator(*op, evaluate(a, mode)?, evaluate(b, mode)?),
    }
}

pub fn apply_operator(op: Operator, a: f64, b: f64) -> Result<f64, DomainError> {
    let v = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b == 0.0 {
                return Err(DomainError::DivideByZero);
            }
            a / b
        }
        Operator::Pow => puissance(a, b)?,
    };
    fini(v)
}

/// Chemin unaire de l’évaluateur (aussi utilisé par les touches immédiates).
pub fn apply_function(f: Function, x: f64, mode: AngleMode) -> Result<f64, DomainError> {
    let v = match f {
        Function::Sin => trig(TrigFn::Sin, x, mode)?,
        Function::Cos => trig(TrigFn::Cos, x, mode)?,
        Function::Tan => trig(TrigFn::Tan, x, mode)?,

        // hyperboliques : valeur brute, quel que soit le mode
        Function::Sinh => x.sinh(),
        Function::Cosh => x.cosh(),
        Function::Tanh => x.tanh(),

        Function::Ln | Function::Log10 => {
            if x <= 0.0 {
                return Err(DomainError::NonPositiveLog);
            }
            if f == Function::Ln {
                x.ln()
            } else {
                x.log10()
            }
        }

        Function::Sqrt => {
            if x < 0.0 {
                return Err(DomainError::NegativeSqrt);
            }
            x.sqrt()
        }
        Function::Cbrt => x.cbrt(),

        Function::Square => x * x,
        Function::Cube => x * x * x,

        Function::Reciprocal => {
            if x == 0.0 {
                return Err(DomainError::ReciprocalOfZero);
            }
            1.0 / x
        }

        Function::Factorial => factorielle(x)?,

        Function::Exp => x.exp(),
        Function::TenPowX => 10f64.powf(x),
        Function::Percent => x / 100.0,
        Function::NegativeSign => -x,
    };
    fini(v)
}

/// Puissance réelle : base négative => exposant entier seulement ; 0^négatif => division par zéro.
fn puissance(a: f64, b: f64) -> Result<f64, DomainError> {
    if a < 0.0 && b.fract() != 0.0 {
        return Err(DomainError::InvalidPower);
    }
    if a == 0.0 && b < 0.0 {
        return Err(DomainError::DivideByZero);
    }
    Ok(a.powf(b))
}

/// n! exact (grand entier) puis conversion f64. n entier, 0 <= n <= FACTORIELLE_MAX.
fn factorielle(x: f64) -> Result<f64, DomainError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(DomainError::InvalidFactorialOperand);
    }
    if x > f64::from(FACTORIELLE_MAX) {
        return Err(DomainError::FactorialOverflow);
    }

    let n = x as u32;
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= k;
    }
    acc.to_f64().ok_or(DomainError::FactorialOverflow)
}

fn fini(v: f64) -> Result<f64, DomainError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DomainError::NonFinite)
    }
}

/// API publique : évalue une expression texte.
pub fn eval_expression(s: &str, mode: AngleMode) -> Result<f64, CalcError> {
    eval_avec_demarche(s, mode).map(|(v, _)| v)
}

/// Comme `eval_expression`, avec la démarche (jetons, RPN, arbre).
pub fn eval_avec_demarche(s: &str, mode: AngleMode) -> Result<(f64, Demarche), CalcError> {
    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Arbre
    let arbre = from_rpn(&rpn)?;

    let d = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_rpn(&rpn),
        arbre: arbre.to_string(),
    };
    tracing::debug!(entree = s, rpn = %d.rpn, ?mode, "évaluation");

    // 4) Valeur
    let v = evaluate(&arbre, mode)?;
    tracing::trace!(valeur = v, "résultat");

    Ok((v, d))
}

/// Lit une seule valeur (nombre ou constante, éventuellement niée).
/// Entrée vide => 0 (l’afficheur montre "0").
pub fn lire_valeur(s: &str, mode: AngleMode) -> Result<f64, CalcError> {
    let jetons = tokenize(s)?;
    if jetons.is_empty() {
        return Ok(0.0);
    }
    let arbre = from_rpn(&to_rpn(&jetons)?)?;
    if !arbre.est_valeur_simple() {
        return Err(SyntaxError::ValeurAttendue.into());
    }
    Ok(evaluate(&arbre, mode)?)
}
