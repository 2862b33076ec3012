//! Machine d’état de la calculatrice.
//!
//! Reçoit une touche à la fois (`handle_key`) et renvoie ce que l’afficheur doit montrer.
//!
//! Contrats :
//! - Aucune erreur ne sort d’ici : elle passe l’état en `Erreur`, l’afficheur montre "Error",
//!   le type précis reste lisible via `derniere_erreur()`.
//! - Toute touche en `Erreur` repart d’une saisie vide, puis est traitée normalement.
//! - La mémoire et le mode d’angle survivent à "C".
//! - Le tampon n’est validé qu’à l’évaluation (pas à chaque frappe).

use super::erreur::{CalcError, DomainError};
use super::eval::{apply_function, eval_avec_demarche, lire_valeur, Demarche};
use super::format::{format_resultat, CHIFFRES_DEFAUT};
use super::jetons::{Constant, Function, Operator};
use super::trig::AngleMode;

/// Texte uniforme de l’afficheur en cas d’erreur.
pub const TEXTE_ERREUR: &str = "Error";

/// Garde-fou : au-delà, le f64 n’a plus de chiffres fiables.
pub const CHIFFRES_MAX: usize = 15;

/// Glyphes postfixés pouvant suivre un opérande (², !, %…).
const POSTFIXES: &[char] = &['²', '³', '!', '%', '¹', '⁻'];

/// Touches de la calculatrice (ensemble fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(u8),
    Point,
    Operateur(Operator),
    /// Fonction appliquée immédiatement à la valeur affichée (sin, x², 1/x…).
    Fonction(Function),
    /// `%` postfixé dans l’expression.
    Pourcent,
    ParenG,
    ParenD,
    Constante(Constant),
    Egal,
    Effacer,
    PlusMoins,
    MemPlus,
    MemMoins,
    MemRappel,
    MemEffacer,
    ModeAngle,
    /// EE : exposant décimal.
    Exposant,
    Retour,
}

impl Touche {
    /// Étiquette du pavé (ou caractère tapé) -> touche.
    pub fn depuis_glyphe(g: &str) -> Option<Touche> {
        let mut it = g.chars();
        if let (Some(c), None) = (it.next(), it.next()) {
            if let Some(d) = c.to_digit(10) {
                return Some(Touche::Chiffre(d as u8));
            }
        }

        let t = match g {
            "." | "," => Touche::Point,

            "+" => Touche::Operateur(Operator::Add),
            "-" | "−" => Touche::Operateur(Operator::Sub),
            "*" | "×" => Touche::Operateur(Operator::Mul),
            "/" | "÷" => Touche::Operateur(Operator::Div),
            "^" | "xʸ" => Touche::Operateur(Operator::Pow),

            "sin" => Touche::Fonction(Function::Sin),
            "cos" => Touche::Fonction(Function::Cos),
            "tan" => Touche::Fonction(Function::Tan),
            "sinh" => Touche::Fonction(Function::Sinh),
            "cosh" => Touche::Fonction(Function::Cosh),
            "tanh" => Touche::Fonction(Function::Tanh),
            "ln" => Touche::Fonction(Function::Ln),
            "log₁₀" | "log" => Touche::Fonction(Function::Log10),
            "²√x" | "√" => Touche::Fonction(Function::Sqrt),
            "³√x" | "∛" => Touche::Fonction(Function::Cbrt),
            "x²" => Touche::Fonction(Function::Square),
            "x³" => Touche::Fonction(Function::Cube),
            "1/x" => Touche::Fonction(Function::Reciprocal),
            "x!" | "!" => Touche::Fonction(Function::Factorial),
            "eˣ" => Touche::Fonction(Function::Exp),
            "10ˣ" => Touche::Fonction(Function::TenPowX),

            "%" => Touche::Pourcent,
            "(" => Touche::ParenG,
            ")" => Touche::ParenD,
            "π" | "pi" => Touche::Constante(Constant::Pi),
            "e" => Touche::Constante(Constant::E),

            "=" => Touche::Egal,
            "C" | "AC" => Touche::Effacer,
            "±" => Touche::PlusMoins,
            "m+" => Touche::MemPlus,
            "m-" => Touche::MemMoins,
            "mr" => Touche::MemRappel,
            "mc" => Touche::MemEffacer,
            "Rad" | "Deg" => Touche::ModeAngle,
            "EE" => Touche::Exposant,
            "⌫" | "DEL" => Touche::Retour,

            _ => return None,
        };
        Some(t)
    }
}

/// Ce que l’UI doit afficher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage {
    pub texte: String,
    pub erreur: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etat {
    /// construction de l’expression
    Saisie,
    /// le tampon contient un résultat (un chiffre repart de zéro, un opérateur le prolonge)
    Resultat,
    Erreur,
}

/// Réglages de départ (ligne de commande).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub mode: AngleMode,
    pub chiffres: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode: AngleMode::Degrees,
            chiffres: CHIFFRES_DEFAUT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Calculatrice {
    entree: String,
    memoire: f64,
    mode: AngleMode,
    etat: Etat,
    derniere_erreur: Option<CalcError>,
    demarche: Option<Demarche>,
    chiffres: usize,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default())
    }
}

impl Calculatrice {
    pub fn avec_reglages(r: Reglages) -> Self {
        Self {
            entree: String::new(),
            memoire: 0.0,
            mode: r.mode,
            etat: Etat::Saisie,
            derniere_erreur: None,
            demarche: None,
            chiffres: r.chiffres.clamp(1, CHIFFRES_MAX),
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn entree(&self) -> &str {
        &self.entree
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    pub fn etat(&self) -> Etat {
        self.etat
    }

    pub fn derniere_erreur(&self) -> Option<&CalcError> {
        self.derniere_erreur.as_ref()
    }

    /// Démarche du dernier "=" réussi.
    pub fn demarche(&self) -> Option<&Demarche> {
        self.demarche.as_ref()
    }

    pub fn chiffres(&self) -> usize {
        self.chiffres
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
    }

    pub fn affichage(&self) -> Affichage {
        match self.etat {
            Etat::Erreur => Affichage {
                texte: TEXTE_ERREUR.to_string(),
                erreur: true,
            },
            _ if self.entree.is_empty() => Affichage {
                texte: "0".to_string(),
                erreur: false,
            },
            _ => Affichage {
                texte: self.entree.clone(),
                erreur: false,
            },
        }
    }

    /* ------------------------ Entrée principale ------------------------ */

    pub fn handle_key(&mut self, touche: Touche) -> Affichage {
        tracing::debug!(?touche, etat = ?self.etat, entree = %self.entree, "touche");

        if self.etat == Etat::Erreur {
            self.entree.clear();
            self.derniere_erreur = None;
            self.etat = Etat::Saisie;
        }

        if let Err(e) = self.appliquer(touche) {
            tracing::warn!(erreur = %e, entree = %self.entree, "calcul impossible");
            self.derniere_erreur = Some(e);
            self.etat = Etat::Erreur;
        }

        self.affichage()
    }

    fn appliquer(&mut self, touche: Touche) -> Result<(), CalcError> {
        match touche {
            Touche::Chiffre(d) => self.chiffre(d),
            Touche::Point => self.point(),
            Touche::Operateur(op) => self.operateur(op),
            Touche::Fonction(f) => return self.fonction_immediate(f),
            Touche::Pourcent => {
                self.prolonger();
                self.pousser_colle('%');
            }
            Touche::ParenG => {
                self.nouvelle_saisie_si_resultat();
                self.entree.push('(');
            }
            Touche::ParenD => {
                self.prolonger();
                self.pousser_colle(')');
            }
            Touche::Constante(k) => {
                self.nouvelle_saisie_si_resultat();
                self.entree.push_str(k.glyphe());
            }
            Touche::Egal => return self.egal(),
            Touche::Effacer => {
                self.entree.clear();
                self.etat = Etat::Saisie;
            }
            Touche::PlusMoins => self.plus_moins(),
            Touche::MemPlus => return self.memoire_ajoute(1.0),
            Touche::MemMoins => return self.memoire_ajoute(-1.0),
            Touche::MemRappel => {
                self.entree = format_resultat(self.memoire, self.chiffres);
                self.etat = Etat::Resultat;
            }
            Touche::MemEffacer => self.memoire = 0.0,
            Touche::ModeAngle => {
                self.mode = self.mode.bascule();
                tracing::info!(mode = self.mode.libelle(), "mode d’angle");
            }
            Touche::Exposant => self.exposant(),
            Touche::Retour => self.retour(),
        }
        Ok(())
    }

    /* ------------------------ Saisie ------------------------ */

    fn nouvelle_saisie_si_resultat(&mut self) {
        if self.etat == Etat::Resultat {
            self.entree.clear();
            self.etat = Etat::Saisie;
        }
    }

    /// Un résultat peut être prolongé (opérateur, postfixe, parenthèse fermante).
    fn prolonger(&mut self) {
        if self.etat == Etat::Resultat {
            self.etat = Etat::Saisie;
        }
    }

    fn pousser_colle(&mut self, c: char) {
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
        self.entree.push(c);
    }

    fn chiffre(&mut self, d: u8) {
        let Some(c) = char::from_digit(u32::from(d), 10) else {
            return;
        };
        self.nouvelle_saisie_si_resultat();

        // "0" isolé : remplacé par le chiffre suivant
        if nombre_final(&self.entree) == "0" {
            self.entree.pop();
        }
        self.entree.push(c);
    }

    fn point(&mut self) {
        self.nouvelle_saisie_si_resultat();

        let n = nombre_final(&self.entree);
        if n.contains('.') || n.contains('E') {
            return;
        }
        if n.is_empty() {
            self.entree.push_str("0.");
        } else {
            self.entree.push('.');
        }
    }

    fn exposant(&mut self) {
        self.prolonger();

        let n = nombre_final(&self.entree);
        if n.is_empty() || n.contains('E') {
            return;
        }
        self.entree.push('E');
    }

    fn operateur(&mut self, op: Operator) {
        self.prolonger();
        if self.entree.is_empty() {
            self.entree.push('0');
        }

        match self.entree.trim_end().chars().last() {
            // signe d’exposant : 1E-5
            Some('E') if matches!(op, Operator::Add | Operator::Sub) => {
                self.entree.push(if op == Operator::Sub { '-' } else { '+' });
            }
            // après un opérateur : "−" devient un moins unaire, sinon remplacement
            Some(c) if est_glyphe_operateur(c) => {
                if op == Operator::Sub && c != '-' {
                    self.entree.push('-');
                } else {
                    self.retirer_operateur_final();
                    self.pousser_operateur(op);
                }
            }
            Some('(') if op == Operator::Sub => self.entree.push('-'),
            _ => self.pousser_operateur(op),
        }
    }

    fn pousser_operateur(&mut self, op: Operator) {
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
        self.entree.push(' ');
        self.entree.push_str(op.glyphe());
        self.entree.push(' ');
    }

    fn retirer_operateur_final(&mut self) {
        loop {
            let n = self.entree.trim_end().len();
            self.entree.truncate(n);
            match self.entree.chars().last() {
                Some(c) if est_glyphe_operateur(c) => {
                    self.entree.pop();
                }
                _ => break,
            }
        }
    }

    fn retour(&mut self) {
        if self.etat == Etat::Resultat {
            self.entree.clear();
            self.etat = Etat::Saisie;
            return;
        }
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
        self.entree.pop();
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
    }

    /// ± : nie l’opérande final (retire son moins unaire s’il existe, sinon en ajoute un).
    fn plus_moins(&mut self) {
        let mut chars: Vec<char> = self.entree.chars().collect();
        let mut fin = chars.len();
        while fin > 0 && chars[fin - 1] == ' ' {
            fin -= 1;
        }
        let Some(debut) = debut_operande(&chars, fin) else {
            return;
        };

        if debut > 0 && chars[debut - 1] == '-' {
            chars.remove(debut - 1);
        } else {
            chars.insert(debut, '-');
        }
        self.entree = chars.into_iter().collect();
    }

    /* ------------------------ Calculs ------------------------ */

    fn egal(&mut self) -> Result<(), CalcError> {
        if self.entree.trim().is_empty() {
            self.entree.clear();
            self.etat = Etat::Resultat;
            return Ok(());
        }

        let (v, d) = eval_avec_demarche(&self.entree, self.mode)?;
        tracing::info!(expression = %self.entree, resultat = v, "=");

        self.entree = format_resultat(v, self.chiffres);
        self.demarche = Some(d);
        self.etat = Etat::Resultat;
        Ok(())
    }

    fn fonction_immediate(&mut self, f: Function) -> Result<(), CalcError> {
        let x = lire_valeur(&self.entree, self.mode)?;
        let v = apply_function(f, x, self.mode)?;
        tracing::debug!(fonction = f.glyphe(), x, v, "fonction immédiate");

        self.entree = format_resultat(v, self.chiffres);
        self.etat = Etat::Resultat;
        Ok(())
    }

    fn memoire_ajoute(&mut self, signe: f64) -> Result<(), CalcError> {
        let x = lire_valeur(&self.entree, self.mode)?;
        let m = self.memoire + signe * x;
        if !m.is_finite() {
            return Err(DomainError::NonFinite.into());
        }
        self.memoire = m;
        self.etat = Etat::Resultat;
        Ok(())
    }
}

/* ------------------------ Analyse du tampon (texte) ------------------------ */

fn est_glyphe_operateur(c: char) -> bool {
    matches!(c, '+' | '−' | '×' | '÷' | '^' | '-')
}

fn est_fin_de_valeur(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ')' | 'π' | 'e') || POSTFIXES.contains(&c)
}

/// Littéral numérique en fin de tampon ("" si aucun).
fn nombre_final(s: &str) -> &str {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut debut = s.len();
    let mut k = chars.len();
    while k > 0 {
        let (idx, c) = chars[k - 1];
        let signe_exposant = matches!(c, '+' | '-' | '−') && k >= 2 && chars[k - 2].1 == 'E';
        if !(c.is_ascii_digit() || c == '.' || c == 'E' || signe_exposant) {
            break;
        }
        debut = idx;
        k -= 1;
    }
    &s[debut..]
}

/// Début (index char) de l’opérande qui finit en `fin`, multiplication implicite comprise
/// ("2π", "3(1+2)"). None si le tampon finit par un opérateur ou "(".
fn debut_operande(chars: &[char], fin: usize) -> Option<usize> {
    let mut k = fin;
    while k > 0 && POSTFIXES.contains(&chars[k - 1]) {
        k -= 1;
    }
    if k == 0 {
        return None;
    }

    let c = chars[k - 1];
    let debut = if c == ')' {
        let mut profondeur = 0usize;
        let mut j = k;
        loop {
            if j == 0 {
                return None;
            }
            j -= 1;
            match chars[j] {
                ')' => profondeur += 1,
                '(' => {
                    profondeur -= 1;
                    if profondeur == 0 {
                        break j;
                    }
                }
                _ => {}
            }
        }
    } else if c == 'π' || c == 'e' {
        k - 1
    } else if c.is_ascii_digit() || c == '.' {
        let texte: String = chars[..k].iter().collect();
        k - nombre_final(&texte).chars().count()
    } else {
        return None;
    };

    // facteur collé à gauche : même opérande
    if debut > 0 && est_fin_de_valeur(chars[debut - 1]) {
        return debut_operande(chars, debut).or(Some(debut));
    }
    Some(debut)
}
