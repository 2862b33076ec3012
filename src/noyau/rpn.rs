// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Expr
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la structure
// - Puis reconstruire l’arbre Expr
//
// Règles:
// - Priorités : postfixées > préfixées / moins unaire > ^ (droite) > × ÷ > + −
// - Moins unaire : '-' quand on attend une valeur => Function::NegativeSign
// - Postfixées (², !, %…) : sortie directe, donc collées à l’opérande qui précède
// - Fonction préfixée suivie d’une parenthèse : sortie dès la fermante (sin(30)² = (sin 30)²)
// - Multiplication implicite : valeur suivie de constante, '(' ou fonction (2π, 2(3), 3 sin 30)

use super::erreur::SyntaxError;
use super::expr::Expr;
use super::jetons::{Constant, Function, Operator, Tok};

/// Profondeur maximale de l’arbre : l’évaluation, l’affichage et la libération
/// de l’arbre sont récursifs.
pub const PROFONDEUR_MAX: usize = 512;

/// Élément de la notation polonaise inversée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Nombre(f64),
    Constante(Constant),
    Binaire(Operator),
    Fonction(Function),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Operator),
    Prefixe(Function),
    LPar,
}

fn precedence(op: Operator) -> i32 {
    match op {
        Operator::Add | Operator::Sub => 1,
        Operator::Mul | Operator::Div => 2,
        Operator::Pow => 3,
    }
}

fn is_right_associative(op: Operator) -> bool {
    matches!(op, Operator::Pow)
}

/// Dépile ce qui doit sortir avant `op`, puis empile `op`.
fn empiler_binaire(op: Operator, ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(top) = ops.last().copied() {
        let doit_pop = match top {
            Pile::LPar => false,
            // préfixées : priorité maximale
            Pile::Prefixe(_) => true,
            Pile::Op(t) => {
                if is_right_associative(op) {
                    precedence(t) > precedence(op)
                } else {
                    precedence(t) >= precedence(op)
                }
            }
        };
        if !doit_pop {
            break;
        }
        ops.pop();
        out.push(vers_rpn(top));
    }
    ops.push(Pile::Op(op));
}

fn vers_rpn(p: Pile) -> Rpn {
    match p {
        Pile::Op(op) => Rpn::Binaire(op),
        Pile::Prefixe(f) => Rpn::Fonction(f),
        Pile::LPar => unreachable!("parenthèse consommée avant la sortie"),
    }
}

fn manque_operande(precedent_prefixe: bool) -> SyntaxError {
    if precedent_prefixe {
        SyntaxError::FonctionSansOperande
    } else {
        SyntaxError::OperandeManquant
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(Add), Num(3), Op(Mul), Num(4)]
///   rpn:    [Nombre(2), Nombre(3), Nombre(4), Binaire(Mul), Binaire(Add)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::Vide);
    }

    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur attendue” = on est en début d’opérande (début, après opérateur, '(' ou fonction)
    let mut attend_valeur = true;
    let mut precedent_binaire = false;
    let mut precedent_prefixe = false;

    for tok in tokens.iter().copied() {
        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(SyntaxError::ValeursAdjacentes);
                }
                out.push(Rpn::Nombre(v));
                attend_valeur = false;
            }

            Tok::Constante(k) => {
                if !attend_valeur {
                    empiler_binaire(Operator::Mul, &mut ops, &mut out);
                }
                out.push(Rpn::Constante(k));
                attend_valeur = false;
            }

            Tok::LPar => {
                if !attend_valeur {
                    empiler_binaire(Operator::Mul, &mut ops, &mut out);
                }
                ops.push(Pile::LPar);
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(manque_operande(precedent_prefixe));
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(p) => out.push(vers_rpn(p)),
                        None => return Err(SyntaxError::ParentheseNonOuverte),
                    }
                }

                // fonctions collées à ce groupe (le moins unaire attend la suite)
                while let Some(Pile::Prefixe(f)) = ops.last().copied() {
                    if f == Function::NegativeSign {
                        break;
                    }
                    ops.pop();
                    out.push(Rpn::Fonction(f));
                }

                attend_valeur = false;
            }

            Tok::Fonction(f) if f.est_postfixe() => {
                if attend_valeur {
                    return Err(SyntaxError::FonctionSansOperande);
                }
                out.push(Rpn::Fonction(f));
            }

            Tok::Fonction(f) => {
                if !attend_valeur {
                    empiler_binaire(Operator::Mul, &mut ops, &mut out);
                }
                ops.push(Pile::Prefixe(f));
                attend_valeur = true;
            }

            Tok::Op(op) => {
                if attend_valeur {
                    if op == Operator::Sub {
                        ops.push(Pile::Prefixe(Function::NegativeSign));
                    } else if precedent_binaire {
                        return Err(SyntaxError::OperateursConsecutifs);
                    } else {
                        return Err(manque_operande(precedent_prefixe));
                    }
                } else {
                    empiler_binaire(op, &mut ops, &mut out);
                    attend_valeur = true;
                }
            }
        }

        precedent_binaire = matches!(tok, Tok::Op(_));
        precedent_prefixe = matches!(tok, Tok::Fonction(f) if !f.est_postfixe());
    }

    if attend_valeur {
        return Err(manque_operande(precedent_prefixe));
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        if matches!(p, Pile::LPar) {
            return Err(SyntaxError::ParentheseNonFermee);
        }
        out.push(vers_rpn(p));
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque sous-arbre garde sa profondeur : au-delà de `PROFONDEUR_MAX`,
/// `SyntaxError::TropProfond` (pas de débordement de pile plus loin).
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, SyntaxError> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for r in rpn.iter().copied() {
        let (noeud, profondeur) = match r {
            Rpn::Nombre(v) => (Expr::Literal(v), 1),
            Rpn::Constante(k) => (Expr::Constante(k), 1),

            Rpn::Binaire(op) => {
                let (b, pb) = st.pop().ok_or(SyntaxError::OperandeManquant)?;
                let (a, pa) = st.pop().ok_or(SyntaxError::OperandeManquant)?;
                (Expr::binaire(op, a, b), pa.max(pb) + 1)
            }

            Rpn::Fonction(f) => {
                let (x, px) = st.pop().ok_or(SyntaxError::FonctionSansOperande)?;
                (Expr::unaire(f, x), px + 1)
            }
        };
        if profondeur > PROFONDEUR_MAX {
            return Err(SyntaxError::TropProfond);
        }
        st.push((noeud, profondeur));
    }

    if st.len() != 1 {
        return Err(SyntaxError::OperandeManquant);
    }
    st.pop().map(|(e, _)| e).ok_or(SyntaxError::Vide)
}

/// Jetons -> arbre (validation structurelle complète).
pub fn parse(tokens: &[Tok]) -> Result<Expr, SyntaxError> {
    let rpn = to_rpn(tokens)?;
    from_rpn(&rpn)
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Nombre(v) => format!("{v}"),
            Rpn::Constante(k) => k.glyphe().to_string(),
            Rpn::Binaire(op) => op.glyphe().to_string(),
            Rpn::Fonction(f) => f.glyphe().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
