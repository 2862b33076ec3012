//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter la calculatrice (machine d’état du noyau) et le dernier affichage,
//! et traduire les clics / frappes en touches.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `Calculatrice::handle_key`.
//! - Le texte affiché vient toujours de la machine (jamais édité à la main).
//! - Le détail d’erreur est un message lisible, l’écran ne montre que "Error".

use crate::noyau::{Affichage, Calculatrice, Reglages, Touche};

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- noyau ---
    pub calc: Calculatrice,

    // --- sorties ---
    pub affichage: Affichage,
    pub detail: String, // message d’erreur détaillé (vide si pas d’erreur)
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        let calc = Calculatrice::avec_reglages(reglages);
        let affichage = calc.affichage();
        Self {
            calc,
            affichage,
            detail: String::new(),
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    pub fn appuyer(&mut self, touche: Touche) {
        self.affichage = self.calc.handle_key(touche);
        self.detail = self
            .calc
            .derniere_erreur()
            .map(|e| e.to_string())
            .unwrap_or_default();
    }

    /// Libellé du pavé ou caractère tapé. false si le glyphe n’est pas une touche.
    pub fn appuyer_glyphe(&mut self, glyphe: &str) -> bool {
        match Touche::depuis_glyphe(glyphe) {
            Some(t) => {
                self.appuyer(t);
                true
            }
            None => {
                tracing::trace!(glyphe, "glyphe ignoré");
                false
            }
        }
    }

    /// Indicateur "M" : mémoire non nulle.
    pub fn memoire_active(&self) -> bool {
        self.calc.memoire() != 0.0
    }
}
