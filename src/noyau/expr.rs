// src/noyau/expr.rs
//
// Arbre d’expression (sortie du parseur, lu par l’évaluateur).
// - Literal   : nombre
// - Constante : π / e (valeur résolue à l’évaluation)
// - UnaryOp   : fonction appliquée à un sous-arbre (préfixée ou postfixée)
// - BinaryOp  : opérateur binaire
//
// L’arbre est acyclique et possédé ; l’évaluateur ne fait que l’emprunter.

use std::fmt;

use super::jetons::{Constant, Function, Operator};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(f64),
    Constante(Constant),
    UnaryOp(Function, Box<Expr>),
    BinaryOp(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn unaire(f: Function, x: Expr) -> Expr {
        Expr::UnaryOp(f, Box::new(x))
    }

    pub fn binaire(op: Operator, a: Expr, b: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(a), Box::new(b))
    }

    /// Vrai si l’arbre est une seule valeur : nombre ou constante, éventuellement niée.
    /// (touches "immédiates" : sin, x², m+… n’acceptent que ça)
    pub fn est_valeur_simple(&self) -> bool {
        match self {
            Expr::Literal(_) | Expr::Constante(_) => true,
            Expr::UnaryOp(Function::NegativeSign, x) => {
                matches!(**x, Expr::Literal(_) | Expr::Constante(_))
            }
            _ => false,
        }
    }
}

/// Rendu parenthésé complet (démarche) : aucune ambiguïté de priorité.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Constante(k) => f.write_str(k.glyphe()),
            Expr::UnaryOp(Function::NegativeSign, x) => write!(f, "-({x})"),
            Expr::UnaryOp(func, x) if func.est_postfixe() => write!(f, "({x}){}", func.glyphe()),
            Expr::UnaryOp(func, x) => write!(f, "{}({x})", func.glyphe()),
            Expr::BinaryOp(op, a, b) => write!(f, "({a} {} {b})", op.glyphe()),
        }
    }
}
