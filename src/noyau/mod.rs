//! Noyau de calcul (sans UI)
//!
//! Organisation interne :
//! - erreur.rs   : LexError / SyntaxError / DomainError (+ CalcError)
//! - jetons.rs   : tokenisation des glyphes du pavé
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : arbre d’expression
//! - trig.rs     : mode d’angle + sin/cos/tan
//! - eval.rs     : évaluation f64 + pipeline complet
//! - format.rs   : affichage d’un résultat
//! - machine.rs  : machine d’état (touche -> affichage)

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod machine;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::CalcError;
pub use eval::eval_expression;
pub use machine::{Affichage, Calculatrice, Reglages, Touche};
pub use trig::AngleMode;
