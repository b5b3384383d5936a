use std::fmt::Write;

use appointment_cell::{DoctorsSection, SlotsBody, TurnosView};
use shared_models::ui::Layout;
use specialty_cell::{CatalogBody, SpecialtiesView};

fn layout_banner(layout: Layout) -> &'static str {
    match layout {
        Layout::Cliente => "== Área de pacientes ==",
        Layout::Public => "== Turnos médicos ==",
    }
}

pub fn specialties(view: &SpecialtiesView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", layout_banner(view.layout));
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}\n", view.subtitle);

    match &view.body {
        CatalogBody::Skeleton { count } => {
            for _ in 0..*count {
                let _ = writeln!(out, "  ░░░░░░░░░░░░");
            }
        }
        CatalogBody::Retry {
            error,
            description,
            action_label,
        } => {
            let _ = writeln!(out, "{}", error);
            let _ = writeln!(out, "{}", description);
            let _ = writeln!(out, "[{}] turnos specialties", action_label);
        }
        CatalogBody::Empty {
            title,
            description,
            action_label,
            ..
        } => {
            let _ = writeln!(out, "{}", title);
            let _ = writeln!(out, "{}", description);
            let _ = writeln!(out, "[{}] turnos specialties", action_label);
        }
        CatalogBody::Grid(cards) => {
            for card in cards {
                let _ = writeln!(out, "#{} {}", card.id, card.name);
                if !card.description.is_empty() {
                    let _ = writeln!(out, "   {}", card.description);
                }
                let _ = writeln!(out, "   imagen: {}", card.image.url);
                let _ = writeln!(out, "   [{}] {}", card.action_label, card.route);
            }
        }
    }

    out
}

pub fn turnos(view: &TurnosView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", layout_banner(view.layout));
    let _ = writeln!(out, "{}\n", view.heading);

    match &view.doctors {
        DoctorsSection::Loading => {
            let _ = writeln!(out, "Cargando doctores...");
        }
        DoctorsSection::Empty { message } | DoctorsSection::Unavailable { message } => {
            let _ = writeln!(out, "{}", message);
        }
        DoctorsSection::Cards(cards) => {
            for card in cards {
                let marker = if card.selected { '*' } else { ' ' };
                let _ = writeln!(out, "{} #{} {} ({})", marker, card.id, card.name, card.specialty);
                let _ = writeln!(out, "     {}", card.quota_label);
                let _ = writeln!(out, "     imagen: {}", card.image.url);
                let _ = writeln!(out, "     [{}] --doctor {}", card.action_label, card.id);
            }
        }
    }

    if let Some(schedule) = &view.schedule {
        let _ = writeln!(out, "\n{}", schedule.heading);
        match &schedule.body {
            SlotsBody::Loading => {
                let _ = writeln!(out, "Cargando horarios...");
            }
            SlotsBody::Empty { message } | SlotsBody::Unavailable { message } => {
                let _ = writeln!(out, "{}", message);
            }
            SlotsBody::Slots(slots) => {
                for slot in slots {
                    let _ = writeln!(
                        out,
                        "  #{} {} {}  [{}] --slot {}",
                        slot.id, slot.date_label, slot.time_range, slot.action_label, slot.id
                    );
                }
            }
        }
    }

    out
}
