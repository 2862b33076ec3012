//! Tests scientifiques (campagne) : propriétés du pipeline + scénarios au clavier.
//!
//! - tokenize : une suite de chiffres => un seul nombre
//! - évaluation pure : même entrée, même résultat
//! - format -> tokenize : aller-retour à la tolérance près
//! - scénarios de la calculatrice (priorités, mode d’angle, domaine, mémoire)

use super::erreur::{CalcError, DomainError};
use super::eval::{apply_function, evaluate, eval_expression};
use super::format::{format_resultat, CHIFFRES_DEFAUT};
use super::jetons::{tokenize, Function, Tok};
use super::machine::{Calculatrice, Touche};
use super::rpn::parse;
use super::trig::AngleMode;

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn taper(calc: &mut Calculatrice, touches: &[&str]) -> String {
    let mut texte = calc.affichage().texte;
    for g in touches {
        let t = Touche::depuis_glyphe(g).unwrap_or_else(|| panic!("touche inconnue {g:?}"));
        texte = calc.handle_key(t).texte;
    }
    texte
}

/* ------------------------ Tokenize ------------------------ */

#[test]
fn sci_chiffres_un_seul_jeton() {
    let mut d = String::new();
    for k in 0..40u32 {
        d.push(char::from_digit((k * 7 + 3) % 10, 10).unwrap());
        let t = tokenize(&d).unwrap();
        assert_eq!(t.len(), 1, "d={d:?}");
        assert_eq!(t[0], Tok::Num(d.parse::<f64>().unwrap()), "d={d:?}");
    }
}

/* ------------------------ Déterminisme ------------------------ */

#[test]
fn sci_evaluation_deterministe() {
    let exprs = [
        "2 + 3 × 4",
        "sin(30) + cos(60)",
        "√(2) × √(2)",
        "ln(e^3) − log(1000)",
        "(1 + 2) ^ 0.5 ÷ 7",
        "5! ÷ 3!",
        "−2π + 10%",
    ];
    for mode in [AngleMode::Degrees, AngleMode::Radians] {
        for s in exprs {
            let arbre = parse(&tokenize(s).unwrap()).unwrap();
            let a = evaluate(&arbre, mode).unwrap();
            let b = evaluate(&arbre, mode).unwrap();
            let c = eval_expression(s, mode).unwrap();
            assert_eq!(a.to_bits(), b.to_bits(), "s={s:?}");
            assert_eq!(a.to_bits(), c.to_bits(), "s={s:?}");
        }
    }
}

/* ------------------------ Aller-retour format ------------------------ */

#[test]
fn sci_format_puis_tokenize() {
    let valeurs = [
        0.5,
        14.0,
        1.0 / 3.0,
        std::f64::consts::PI,
        123456.789,
        2.5e-9,
        6.02214076e23,
        7.257415615307994e306,
        0.000123,
    ];
    for v in valeurs {
        let s = format_resultat(v, CHIFFRES_DEFAUT);
        let t = tokenize(&s).unwrap_or_else(|e| panic!("s={s:?} err={e}"));
        assert_eq!(t.len(), 1, "s={s:?}");
        match t[0] {
            Tok::Num(r) => assert!(proche(r, v), "v={v} s={s:?} r={r}"),
            autre => panic!("attendu un nombre, obtenu {autre:?}"),
        }
    }
}

#[test]
fn sci_format_negatif_reevalue() {
    for v in [-5.0, -0.125, -1.5e-7, -3.0e40] {
        let s = format_resultat(v, CHIFFRES_DEFAUT);
        let r = eval_expression(&s, AngleMode::Degrees).unwrap();
        assert!(proche(r, v), "v={v} s={s:?} r={r}");
    }
}

/* ------------------------ Scénarios ------------------------ */

#[test]
fn sci_priorites() {
    assert_eq!(eval_expression("2 + 3 × 4", AngleMode::Degrees), Ok(14.0));
    assert_eq!(eval_expression("(2 + 3) × 4", AngleMode::Degrees), Ok(20.0));
}

#[test]
fn sci_sinus_selon_mode() {
    let deg = apply_function(Function::Sin, 90.0, AngleMode::Degrees).unwrap();
    assert!(proche(deg, 1.0));
    let rad = apply_function(Function::Sin, 90.0, AngleMode::Radians).unwrap();
    assert!(proche(rad, 0.8939966636), "rad={rad}");
}

#[test]
fn sci_domaines() {
    let m = AngleMode::Degrees;
    assert_eq!(
        apply_function(Function::Sqrt, -1.0, m),
        Err(DomainError::NegativeSqrt)
    );
    assert_eq!(
        apply_function(Function::Factorial, 3.5, m),
        Err(DomainError::InvalidFactorialOperand)
    );
    assert_eq!(apply_function(Function::Factorial, 5.0, m), Ok(120.0));
}

#[test]
fn sci_division_par_zero_clavier() {
    let mut calc = Calculatrice::default();
    assert_eq!(taper(&mut calc, &["5", "÷", "0", "="]), "Error");
    assert_eq!(
        calc.derniere_erreur(),
        Some(&CalcError::Domain(DomainError::DivideByZero))
    );
    assert_eq!(taper(&mut calc, &["4"]), "4");
    assert_eq!(taper(&mut calc, &["+", "1", "="]), "5");
}

#[test]
fn sci_memoire_mc_remet_a_zero() {
    let mut calc = Calculatrice::default();
    assert_eq!(taper(&mut calc, &["5", "m+", "mc", "mr"]), "0");
}

#[test]
fn sci_erreurs_toujours_recuperables() {
    let fautifs: &[&[&str]] = &[
        &["(", "="],
        &["1", "±", "ln"],
        &["0", "1/x"],
        &["2", "0", "0", "x!"],
        &["9", "0", "tan"],
        &["1", "EE", "4", "0", "0", "="],
        &["×", "×", ")", "="],
    ];
    for touches in fautifs {
        let mut calc = Calculatrice::default();
        assert_eq!(taper(&mut calc, touches), "Error", "touches={touches:?}");
        assert!(calc.derniere_erreur().is_some());
        assert_eq!(taper(&mut calc, &["7"]), "7", "touches={touches:?}");
        assert!(calc.derniere_erreur().is_none());
    }
}

#[test]
fn sci_instances_independantes() {
    let mut a = Calculatrice::default();
    let mut b = Calculatrice::default();
    taper(&mut a, &["Rad", "5", "m+"]);
    taper(&mut b, &["9", "0", "sin"]);
    assert_eq!(b.affichage().texte, "1");
    assert_eq!(b.memoire(), 0.0);
    assert_eq!(a.mode(), AngleMode::Radians);
    assert_eq!(b.mode(), AngleMode::Degrees);
}
