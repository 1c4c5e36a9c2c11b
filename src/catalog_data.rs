// The built-in catalog: the areas, channels, teams and rubrics of the
// university contact-center operation. A JSON catalog passed with
// --catalog replaces all of this.

use rubric_scoring::{AreaConfig, RubricCatalog};

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn questions(v: &[(&str, u32)]) -> Vec<(String, u32)> {
    v.iter().map(|(q, w)| (q.to_string(), *w)).collect()
}

pub fn default_catalog() -> RubricCatalog {
    let mut catalog = RubricCatalog::new();

    catalog.add_area(
        "CASA UR",
        AreaConfig {
            channels: strings(&["Presencial", "Contact Center", "Chat", "Back Office"]),
            monitors: strings(&[
                "Mauricio Ramirez Cubillos",
                "Alejandro Parra Sánchez",
                "Cristian Alberto Upegui M",
            ]),
            advisors: strings(&[
                "Adela Bogotá Cagua",
                "David Esteban Puerto Salgado",
                "Diana Marcela Sánchez Cano",
                "Diana Milena Nieto Perez",
                "Jenny Lorena Quintero",
                "Jhon Caballero",
                "Jose Edwin Navarro Rondon",
                "Jose Efrain Arguello",
                "Laura Alejandra Bernal Perez",
                "Leidy Johanna Alonso Rincón",
                "Leyner Anyul Silva Avila",
                "Martha Soraya Monsalve Fonseca",
                "Nancy Viviana Bulla Bustos",
                "Nelson Peña Ramírez",
                "Solangel Milena Rodriguez Quitian",
                "Leidy Sofia Ramirez Paez",
            ]),
        },
    );

    // The attention rubric is shared by the three live channels.
    let casa_live = questions(&[
        (
            "¿Atiende la interacción en el momento que se establece contacto con el(a) usuario(a)?",
            9,
        ),
        (
            "¿Saluda, se presenta de una forma amable y cortés, usando el dialogo de saludo y bienvenida?",
            9,
        ),
        (
            "¿Realiza la validación de identidad del usuario y personaliza la interacción de forma adecuada garantizando la confidencialidad de la información?",
            9,
        ),
        (
            "¿Escucha activamente al usuario y  realiza preguntas adicionales demostrando atención y concentración?",
            9,
        ),
        (
            "¿Consulta todas las herramientas disponibles para estructurar la posible respuesta que se le brindará al usuario?",
            9,
        ),
        (
            "¿Controla los tiempos de espera informando al usuario y realizando acompañamiento cada 2 minutos?",
            9,
        ),
        (
            "¿Brinda respuesta de forma precisa, completa y coherente, de acuerdo a la solicitado por el usuario?",
            14,
        ),
        (
            "¿Valida con el usuario si la información fue clara, completa o si requiere algún trámite adicional?",
            8,
        ),
        (
            "¿Documenta la atención de forma coherente según lo solicitado e informado al cliente; seleccionando las tipologías adecuadas y manejando correcta redacción y ortografía?",
            14,
        ),
        (
            "¿Finaliza la atención de forma amable, cortés utilizando el dialogo de cierre y despedida remitiendo al usuario a responder la encuesta de percepción?",
            10,
        ),
    ]);
    for channel in ["Presencial", "Contact Center", "Chat"] {
        catalog.add_rubric("CASA UR", channel, casa_live.clone());
    }
    catalog.add_rubric(
        "CASA UR",
        "Back Office",
        questions(&[
            ("¿Cumple con el ANS establecido para el servicio?", 20),
            ("¿Analiza correctamente la solicitud?", 20),
            ("¿Gestiona adecuadamente en SAP/UXXI/Bizagi?", 20),
            (
                "¿Respuestas eficaz de acuerdo a la solicitud radicada por el usuario?",
                20,
            ),
            ("¿Es empático al cerrar la solicitud?", 20),
        ]),
    );

    catalog.add_area(
        "Servicios 2030",
        AreaConfig {
            channels: strings(&["Línea 2030", "Chat 2030", "Sitio 2030"]),
            monitors: strings(&["Johanna Rueda Cuvajante", "Cristian Alberto Upegui M"]),
            advisors: strings(&[
                "Juan Sebastian Silva Gomez",
                "Jennyfer Caicedo Alfonso",
                "Jerly Durley Mendez Fontecha",
                "Addison Rodriguez Casallas",
                "Gabriel Ferney Martinez Lopez",
                "Juan David Gonzalez Jimenez",
                "Miguel Angel Rico Acevedo",
                "Juan Camilo Ortega Clavijo",
                "Andres Fernando Galindo Algarra",
                "Adrian Jose Sosa Gil",
                "Andrea Katherine Torres Junco",
                "Leidi Daniela Arias Rodriguez",
            ]),
        },
    );

    let servicios_live = questions(&[
        (
            "¿Atiende la interacción de forma oportuna en el momento que se establece el contacto?",
            9,
        ),
        (
            "¿Saluda y se presenta de manera amable y profesional, estableciendo un inicio cordial de la atención?",
            9,
        ),
        (
            "¿Realiza la validación de identidad del usuario garantizando confidencialidad y aplica protocolos de seguridad de la información?",
            9,
        ),
        (
            "¿Escucha activamente al usuario y formula preguntas pertinentes para un diagnóstico claro y completo?",
            9,
        ),
        (
            "¿Consulta y utiliza todas las herramientas de soporte disponibles (base de conocimiento, sistemas, documentación) para estructurar una respuesta adecuada?",
            9,
        ),
        (
            "¿Gestiona adecuadamente los tiempos de espera, manteniendo informado al usuario y realizando acompañamiento oportuno durante la interacción?",
            9,
        ),
        (
            "¿Sigue el flujo definido para solución o escalamiento, asegurando trazabilidad y cumplimiento de procesos internos?",
            14,
        ),
        (
            "¿Valida con el usuario que la información brindada es clara, completa y confirma si requiere trámites o pasos adicionales?",
            8,
        ),
        (
            "¿Documenta la atención en el sistema de tickets de manera coherente, seleccionando tipologías correctas y con redacción/ortografía adecuadas?",
            14,
        ),
        (
            "¿Finaliza la atención de forma amable y profesional, utilizando el cierre de interacción definido y remitiendo al usuario a la encuesta de satisfacción?",
            10,
        ),
    ]);
    for channel in ["Línea 2030", "Chat 2030"] {
        catalog.add_rubric("Servicios 2030", channel, servicios_live.clone());
    }
    catalog.add_rubric(
        "Servicios 2030",
        "Sitio 2030",
        questions(&[
            ("¿Cumple con el ANS/SLA establecido?", 20),
            (
                "¿Realiza un análisis completo y pertinente de la solicitud, aplicando diagnóstico claro antes de ejecutar acciones?",
                20,
            ),
            (
                "¿Gestiona correctamente en las herramientas institucionales (SAP / UXXI / Salesforce u otras) garantizando trazabilidad y registro adecuado?",
                20,
            ),
            (
                "¿Brinda una respuesta eficaz y alineada a la solicitud radicada por el usuario, asegurando calidad técnica en la solución?",
                20,
            ),
            (
                "¿Comunica el cierre de la solicitud de manera empática y profesional, validando la satisfacción del usuario?",
                20,
            ),
        ]),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_scoring::TABLE_SEPARATOR;

    #[test]
    fn every_channel_has_a_rubric_summing_to_100() {
        let catalog = default_catalog();
        let mut checked = 0;
        for (area, config) in catalog.areas() {
            for channel in config.channels.iter() {
                let rubric = catalog.rubric(area, channel);
                assert!(!rubric.is_empty(), "no rubric for {} / {}", area, channel);
                let sum: u32 = rubric.iter().map(|(_, w)| *w).sum();
                assert_eq!(sum, 100, "weights for {} / {}", area, channel);
                checked += 1;
            }
        }
        assert_eq!(checked, 7);
    }

    #[test]
    fn built_in_catalog_is_clean() {
        assert!(default_catalog().validate().is_empty());
    }

    #[test]
    fn no_area_name_contains_the_separator() {
        let catalog = default_catalog();
        for (area, config) in catalog.areas() {
            assert!(!area.contains(TABLE_SEPARATOR));
            for channel in config.channels.iter() {
                assert!(!channel.contains(TABLE_SEPARATOR));
            }
        }
    }
}
