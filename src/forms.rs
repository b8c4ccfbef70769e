// Lead-capture forms.
//
// Both forms keep their field values locally and, on submit, log the final
// record and show an acknowledgment. Nothing is sent anywhere. The only
// check is that required fields are not empty, matching what the browser's
// `required` attribute already enforces.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    TextArea,
}

impl FieldKind {
    // `type` attribute for <input>; text areas have none
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Email => Some("email"),
            FieldKind::Password => Some("password"),
            FieldKind::TextArea => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

const SIGNUP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Nombre completo",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Ej: Juan Pérez",
    },
    FieldSpec {
        name: "email",
        label: "Correo electrónico",
        kind: FieldKind::Email,
        required: true,
        placeholder: "tu@email.com",
    },
    FieldSpec {
        name: "password",
        label: "Contraseña",
        kind: FieldKind::Password,
        required: true,
        placeholder: "••••••••",
    },
];

const LEAD_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Nombre",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Tu nombre",
    },
    FieldSpec {
        name: "email",
        label: "Correo electrónico",
        kind: FieldKind::Email,
        required: true,
        placeholder: "tu@email.com",
    },
    FieldSpec {
        name: "company",
        label: "Empresa (opcional)",
        kind: FieldKind::Text,
        required: false,
        placeholder: "Nombre de tu empresa",
    },
    FieldSpec {
        name: "message",
        label: "Mensaje",
        kind: FieldKind::TextArea,
        required: false,
        placeholder: "Cuéntanos cómo podemos ayudarte",
    },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormKind {
    Signup,
    Lead,
}

impl FormKind {
    pub fn id(self) -> &'static str {
        match self {
            FormKind::Signup => "signup-form",
            FormKind::Lead => "lead-form",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormKind::Signup => "Crear cuenta nueva",
            FormKind::Lead => "Contacta con nosotros",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            FormKind::Signup => "Comienza tu experiencia hoy mismo",
            FormKind::Lead => "Programa una demostración personalizada",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormKind::Signup => "Registrarse ahora",
            FormKind::Lead => "Solicitar demostración",
        }
    }

    pub fn footnote(self) -> &'static str {
        match self {
            FormKind::Signup => "Al registrarte aceptas nuestros ",
            FormKind::Lead => "Te responderemos en menos de 24 horas hábiles",
        }
    }

    // Link text and href appended after the footnote text
    pub fn footnote_link(self) -> Option<(&'static str, &'static str)> {
        match self {
            FormKind::Signup => Some(("Términos y Condiciones", "#")),
            FormKind::Lead => None,
        }
    }

    pub fn log_label(self) -> &'static str {
        match self {
            FormKind::Signup => "Registro enviado:",
            FormKind::Lead => "Datos enviados:",
        }
    }

    pub fn acknowledgment(self) -> &'static str {
        match self {
            FormKind::Signup => "¡Registro exitoso! Bienvenido a nuestra plataforma.",
            FormKind::Lead => "Gracias por tu interés. Nos pondremos en contacto contigo pronto.",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Signup => SIGNUP_FIELDS,
            FormKind::Lead => LEAD_FIELDS,
        }
    }

    // Values carried in the record without a visible control
    fn fixed_values(self) -> &'static [(&'static str, &'static str)] {
        match self {
            FormKind::Signup => &[("plan", "basic")],
            FormKind::Lead => &[],
        }
    }
}

/// Final field values of one submission, in form order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormRecord {
    pub kind: FormKind,
    pub fields: Vec<(&'static str, String)>,
}

impl FormRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

// Renders like a JS object literal, e.g. `{ name: "Ana", plan: "basic" }`
impl fmt::Display for FormRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:?}", name, value)?;
        }
        f.write_str(" }")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "required fields are empty: {}", self.0.join(", "))
    }
}

/// Where a submitted record goes: a log line and a user-facing notice.
pub trait SubmissionSink {
    fn log(&mut self, label: &str, record: &FormRecord);
    fn acknowledge(&mut self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    kind: FormKind,
    values: Vec<(&'static str, String)>,
}

impl FormState {
    pub fn new(kind: FormKind) -> FormState {
        let values = kind
            .fields()
            .iter()
            .map(|field| (field.name, String::new()))
            .chain(
                kind.fixed_values()
                    .iter()
                    .map(|&(name, value)| (name, value.to_owned())),
            )
            .collect();
        FormState { kind, values }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Update one field from an input event. Unknown or fixed names are
    /// ignored and reported as `false`.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        if !self.kind.fields().iter().any(|field| field.name == name) {
            return false;
        }
        match self.values.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => {
                slot.clear();
                slot.push_str(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        self.kind
            .fields()
            .iter()
            .filter(|field| field.required)
            .filter(|field| self.get(field.name).map_or(true, |v| v.trim().is_empty()))
            .map(|field| field.name)
            .collect()
    }

    pub fn record(&self) -> FormRecord {
        FormRecord {
            kind: self.kind,
            fields: self.values.clone(),
        }
    }

    /// Log the record and acknowledge it, once. A form with empty required
    /// fields is rejected without touching the sink.
    pub fn submit<S: SubmissionSink>(&self, sink: &mut S) -> Result<FormRecord, MissingFields> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }
        let record = self.record();
        sink.log(self.kind.log_label(), &record);
        sink.acknowledge(self.kind.acknowledgment());
        Ok(record)
    }
}
