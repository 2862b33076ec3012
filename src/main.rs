// src/main.rs
//
// Calculatrice scientifique : point d’entrée natif
// ------------------------------------------------
// - Ligne de commande (clap) : mode d’angle initial + chiffres significatifs
// - Journalisation (tracing) : RUST_LOG, "info" par défaut
// - Polices DejaVu du système si présentes : anti “carrés” (², ³, √, π, ⌫…)
//
// IMPORTANT (structure projet):
// - noyau + app vivent dans la bibliothèque (src/lib.rs)
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Ici: point d’entrée seulement

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use calculatrice_scientifique::app::AppCalc;
use calculatrice_scientifique::noyau::{self, AngleMode, Reglages};

const TITRE_APP: &str = "Calculatrice scientifique";

/// Emplacements usuels des polices DejaVu (Linux, puis copie locale).
const POLICES_SANS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "assets/fonts/DejaVuSans.ttf",
];
const POLICES_MONO: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "assets/fonts/DejaVuSansMono.ttf",
];

#[derive(Parser, Debug)]
#[command(name = "calculatrice", version)]
struct Args {
    /// Démarrer en radians (degrés par défaut).
    #[arg(long, default_value_t = false)]
    radians: bool,

    /// Chiffres significatifs affichés (borné à 1..=15).
    #[arg(long, default_value_t = noyau::format::CHIFFRES_DEFAUT)]
    chiffres: usize,
}

impl Args {
    fn reglages(&self) -> Reglages {
        Reglages {
            mode: if self.radians {
                AngleMode::Radians
            } else {
                AngleMode::Degrees
            },
            // borné par Calculatrice::avec_reglages
            chiffres: self.chiffres,
        }
    }
}

/* ------------------------ Polices ------------------------ */

fn lire_police(candidats: &[&str]) -> Option<Vec<u8>> {
    candidats.iter().find_map(|p| match std::fs::read(p) {
        Ok(octets) => {
            tracing::debug!(chemin = *p, "police chargée");
            Some(octets)
        }
        Err(_) => None,
    })
}

fn installer_polices(ctx: &egui::Context) {
    use egui::{FontData, FontDefinitions, FontFamily};

    let mut fonts = FontDefinitions::default();

    for (nom, candidats, famille) in [
        ("dejavu_sans", POLICES_SANS, FontFamily::Proportional),
        ("dejavu_mono", POLICES_MONO, FontFamily::Monospace),
    ] {
        let Some(octets) = lire_police(candidats) else {
            tracing::warn!(police = nom, "police introuvable, police egui par défaut");
            continue;
        };
        fonts
            .font_data
            .insert(nom.to_string(), FontData::from_owned(octets).into());
        fonts
            .families
            .entry(famille)
            .or_default()
            .insert(0, nom.to_string());
    }

    ctx.set_fonts(fonts);
}

/* ------------------------ Entrée ------------------------ */

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let reglages = args.reglages();
    tracing::info!(
        mode = reglages.mode.libelle(),
        chiffres = reglages.chiffres,
        "démarrage"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([640.0, 620.0])
            .with_min_inner_size([600.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            // Contexte egui prêt => polices avant la première frame.
            installer_polices(&cc.egui_ctx);
            Ok(Box::new(AppCalc::new(reglages)))
        }),
    )
}
