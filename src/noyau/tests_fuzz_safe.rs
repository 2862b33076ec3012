//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules les erreurs de domaine sont acceptées
//! - invariant clé : un résultat affiché après "=" se relit à l’identique

use std::time::{Duration, Instant};

use super::erreur::{CalcError, SyntaxError};
use super::eval_expression;
use super::format::{format_resultat, CHIFFRES_DEFAUT};
use super::machine::{Calculatrice, Touche};
use super::trig::AngleMode;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &CalcError) -> bool {
    // Liste blanche : une expression générée est toujours bien formée,
    // seul le domaine peut refuser (÷0, ln(−x), tan(90°), débordement...).
    matches!(e, CalcError::Domain(_))
}

/// Un texte affiché doit se relire et se reformater à l’identique.
fn check_invariant_relecture(texte: &str, mode: AngleMode) {
    let v = eval_expression(texte, mode)
        .unwrap_or_else(|e| panic!("affichage non relisible: {texte:?} err={e}"));
    assert_eq!(
        format_resultat(v, CHIFFRES_DEFAUT),
        texte,
        "reformatage instable pour {texte:?}"
    );
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // entiers et décimaux simples, incluant 0 (utile pour ÷0, ln(0), 0⁻¹)
    let a = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!("{}", a * 10 + rng.pick(10)),
        _ => format!("{a}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "e".to_string(),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(14) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}−{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}×{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}÷{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}^{})", gen_atom(rng)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => {
            if rng.coin() {
                format!("√({a})")
            } else {
                format!("ln({a})")
            }
        }
        10 => format!("({a})²"),
        11 => format!("({a})⁻¹"),
        12 => format!("−({a})"),
        // factorielle bornée : petit entier
        _ => format!("{}!", rng.pick(25)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_de_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        };

        let premier = eval_expression(&expr, mode);
        let second = eval_expression(&expr, mode);

        match (premier, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.to_bits(), b.to_bits(), "non déterministe: {expr:?}");
                assert!(a.is_finite(), "résultat non fini: expr={expr:?} v={a}");
                check_invariant_relecture(&format_resultat(a, CHIFFRES_DEFAUT), mode);
                seen_ok += 1;
            }
            (Err(e), Err(f)) => {
                assert_eq!(e, f, "non déterministe: {expr:?}");
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
            (a, b) => panic!("non déterministe: expr={expr:?} {a:?} / {b:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_touches_aleatoires() {
    const PAVE: &[&str] = &[
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "−", "×", "÷", "xʸ", "(",
        ")", "=", "C", "±", "%", "⌫", "x²", "x³", "eˣ", "10ˣ", "1/x", "²√x", "³√x", "ln",
        "log₁₀", "x!", "sin", "cos", "tan", "sinh", "cosh", "tanh", "π", "e", "EE", "Rad",
        "mc", "m+", "m-", "mr",
    ];

    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        let mut calc = Calculatrice::default();
        for _ in 0..40 {
            budget(t0, max);

            let g = PAVE[rng.pick(PAVE.len() as u32) as usize];
            let touche = Touche::depuis_glyphe(g).unwrap_or_else(|| panic!("touche {g:?}"));
            let aff = calc.handle_key(touche);

            assert_eq!(aff, calc.affichage(), "affichage incohérent après {g:?}");
            assert_eq!(aff.erreur, calc.derniere_erreur().is_some());
            if g == "=" && !aff.erreur {
                check_invariant_relecture(&aff.texte, calc.mode());
            }
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr, AngleMode::Degrees).unwrap_or_else(|e| panic!("err: {e}"));

    // 800 × 0.5 = 400
    assert_eq!(format_resultat(v, CHIFFRES_DEFAUT), "400");
}

#[test]
fn fuzz_safe_chaine_profonde_refusee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // 50 000 moins unaires : erreur de syntaxe, jamais de débordement de pile
    let expr = format!("{}1", "−".repeat(50_000));
    let r = eval_expression(&expr, AngleMode::Degrees);
    budget(t0, max);
    assert_eq!(r, Err(CalcError::Syntax(SyntaxError::TropProfond)));

    // idem en parenthèses imbriquées autour d’une fonction
    let expr = format!("{}1{}", "sin(".repeat(5_000), ")".repeat(5_000));
    let r = eval_expression(&expr, AngleMode::Degrees);
    budget(t0, max);
    assert_eq!(r, Err(CalcError::Syntax(SyntaxError::TropProfond)));
}
