// src/noyau/erreur.rs
//
// Erreurs du noyau (typées).
// - LexError    : caractère / littéral invalide (jetons.rs)
// - SyntaxError : structure invalide (rpn.rs)
// - DomainError : opération mathématiquement indéfinie (eval.rs)
//
// Toutes sont rattrapées par la machine (machine.rs) : jamais fatales.

/// Erreur globale du pipeline jetons → RPN → Expr → évaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("erreur lexicale: {0}")]
    Lex(#[from] LexError),

    #[error("erreur de syntaxe: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("erreur de domaine: {0}")]
    Domain(#[from] DomainError),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("caractère inattendu '{c}' (position {pos})")]
    CaractereInattendu { c: char, pos: usize },

    #[error("plusieurs points décimaux dans un nombre (position {pos})")]
    PointsMultiples { pos: usize },

    #[error("exposant sans chiffres (position {pos})")]
    ExposantIncomplet { pos: usize },

    #[error("nombre invalide (position {pos})")]
    NombreInvalide { pos: usize },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("entrée vide")]
    Vide,

    #[error("parenthèse non fermée")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseNonOuverte,

    #[error("opérateur sans opérande")]
    OperandeManquant,

    #[error("deux opérateurs consécutifs")]
    OperateursConsecutifs,

    #[error("fonction sans argument")]
    FonctionSansOperande,

    #[error("deux nombres adjacents")]
    ValeursAdjacentes,

    /// La touche attend une seule valeur (pas une expression composée).
    #[error("une seule valeur attendue")]
    ValeurAttendue,

    /// Imbrication au-delà de `rpn::PROFONDEUR_MAX`.
    #[error("expression trop imbriquée")]
    TropProfond,
}

/// Code de raison d’une erreur de domaine.
/// L’affichage est uniforme ("Error"), le code reste disponible pour les tests.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("racine carrée d’un négatif")]
    NegativeSqrt,

    #[error("logarithme d’un nombre négatif ou nul")]
    NonPositiveLog,

    #[error("division par zéro")]
    DivideByZero,

    #[error("inverse de zéro")]
    ReciprocalOfZero,

    #[error("factorielle : entier positif ou nul attendu")]
    InvalidFactorialOperand,

    #[error("factorielle trop grande")]
    FactorialOverflow,

    #[error("puissance réelle d’une base négative")]
    InvalidPower,

    #[error("tangente indéfinie")]
    UndefinedTangent,

    #[error("résultat non fini")]
    NonFinite,
}
