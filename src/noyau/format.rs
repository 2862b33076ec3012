// src/noyau/format.rs
//
// Affichage d’un résultat f64
// ---------------------------
// - entier (à quelques ulp près) et |x| < 1e15 => tous ses chiffres, sans point décimal
// - sinon arrondi à N chiffres significatifs (bruit flottant masqué : 0.1+0.2 => 0.3)
// - entier après arrondi => sans point décimal
// - sinon zéros finaux retirés
// - |x| >= 1e15 ou < 1e-5 : notation "mantisseE±exp" (relisible par tokenize)

/// Chiffres significatifs par défaut.
pub const CHIFFRES_DEFAUT: usize = 10;

/// Bornes de la notation décimale simple (exposants décimaux).
const EXP_MAX_FIXE: i32 = 15;
const EXP_MIN_FIXE: i32 = -5;

pub fn format_resultat(v: f64, chiffres: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    // entier exact : pas de plafond de chiffres (2^40 = 1099511627776)
    let entier = v.round();
    if entier.abs() < 10f64.powi(EXP_MAX_FIXE)
        && (v - entier).abs() <= v.abs() * 4.0 * f64::EPSILON
    {
        return sans_moins_zero(format!("{entier:.0}"));
    }

    let chiffres = chiffres.clamp(1, 17);

    // arrondi significatif via la notation scientifique : "1.234500000e3"
    let sci = format!("{:.*e}", chiffres - 1, v);
    let Some((mantisse, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let arrondi: f64 = sci.parse().unwrap_or(v);

    if !(EXP_MIN_FIXE..EXP_MAX_FIXE).contains(&exp) {
        return format!("{}E{exp}", retirer_zeros(mantisse));
    }

    if arrondi.fract() == 0.0 {
        return sans_moins_zero(format!("{arrondi:.0}"));
    }

    let decimales = (chiffres as i32 - 1 - exp).max(0) as usize;
    sans_moins_zero(retirer_zeros(&format!("{arrondi:.decimales$}")))
}

/// "2.500" => "2.5" ; "3.000" => "3" ; "120" inchangé.
fn retirer_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn sans_moins_zero(s: String) -> String {
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
