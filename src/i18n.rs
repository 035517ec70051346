use crate::models::EntryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Nl,
    En,
    Fr,
}

impl Lang {
    /// Match on the two-letter prefix, falling back to Dutch.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        if code.starts_with("en") {
            Lang::En
        } else if code.starts_with("fr") {
            Lang::Fr
        } else {
            Lang::Nl
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::Nl => &NL,
            Lang::En => &EN,
            Lang::Fr => &FR,
        }
    }
}

/// Label catalog for one language. Nothing in the report logic depends on
/// the content of these strings.
#[derive(Debug)]
pub struct Labels {
    title_prefix: &'static str,
    pub employer: &'static str,
    pub employee: &'static str,
    pub norm_day: &'static str,
    pub prev_saldo: &'static str,
    pub saldo: &'static str,
    pub total_hours: &'static str,
    pub overtime_period: &'static str,
    pub columns: [&'static str; 7],
    /// Work, Vacation, Sick, Recup, Holiday
    types: [&'static str; 5],
    info_by_type: [&'static str; 5],
    pub unit_h: &'static str,
}

fn type_index(t: &EntryType) -> Option<usize> {
    match t {
        EntryType::Work => Some(0),
        EntryType::Vacation => Some(1),
        EntryType::Sick => Some(2),
        EntryType::Recup => Some(3),
        EntryType::Holiday => Some(4),
        EntryType::Other(_) | EntryType::Untyped => None,
    }
}

impl Labels {
    pub fn title(&self, period: &str) -> String {
        format!("{} - {period}", self.title_prefix)
    }

    /// Localized name; unknown types keep their persisted name.
    pub fn type_name<'t>(&self, t: &'t EntryType) -> &'t str {
        match type_index(t) {
            Some(i) => self.types[i],
            None => t.as_str(),
        }
    }

    /// Info text for an entry without a note. Empty for work.
    pub fn default_info<'t>(&self, t: &'t EntryType) -> &'t str {
        let info = type_index(t).map_or("", |i| self.info_by_type[i]);
        if info.is_empty() && *t != EntryType::Work {
            self.type_name(t)
        } else {
            info
        }
    }
}

static NL: Labels = Labels {
    title_prefix: "Shift-Tap - Urenregistratie",
    employer: "Werkgever",
    employee: "Werknemer",
    norm_day: "Norm dag",
    prev_saldo: "Saldo overuren vorige maand",
    saldo: "Saldo overuren",
    total_hours: "Totaal uren",
    overtime_period: "Totaal overuren deze periode",
    columns: ["Datum", "Starttijd", "Eindtijd", "Netto", "+/-", "Info", "Opmerkingen"],
    types: ["Werk", "Vakantie", "Ziekte", "Recup", "Feestdag"],
    info_by_type: ["", "Vakantiedag", "Ziekte", "Recupdag", "Feestdag"],
    unit_h: "u",
};

static EN: Labels = Labels {
    title_prefix: "Shift-Tap - Timesheet",
    employer: "Employer",
    employee: "Employee",
    norm_day: "Standard day",
    prev_saldo: "Overtime balance (prev. month)",
    saldo: "Overtime balance",
    total_hours: "Total hours",
    overtime_period: "Overtime this period",
    columns: ["Date", "Start", "End", "Net", "+/-", "Info", "Remarks"],
    types: ["Work", "Vacation", "Sick", "Recup", "Holiday"],
    info_by_type: ["", "Vacation day", "Sick day", "Recup day", "Holiday"],
    unit_h: "h",
};

static FR: Labels = Labels {
    title_prefix: "Shift-Tap - Releve d'heures",
    employer: "Employeur",
    employee: "Employé",
    norm_day: "Journée normale",
    prev_saldo: "Solde heures sup. mois précédent",
    saldo: "Solde heures sup.",
    total_hours: "Total heures",
    overtime_period: "Heures sup. période",
    columns: ["Date", "Début", "Fin", "H nettes", "+/-", "Info", "Remarques"],
    types: ["Travail", "Congé", "Maladie", "Récup", "Férié"],
    info_by_type: ["", "Jour de congé", "Jour maladie", "Jour récup", "Jour férié"],
    unit_h: "h",
};
