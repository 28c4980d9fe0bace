mod api_client;
mod console_state;
mod file_camera;

use colored::*;
use std::io::{self, Write};

use api_client::{bootstrap_session, ClientError, IntakeClient};
use console_state::{ConsoleState, Notice, View};
use file_camera::FileCamera;
use vehicle_intake::models::StoredRecord;
use vehicle_intake::services::image_capture::CameraSession;
use vehicle_intake::services::image_payload::decode_data_url;
use vehicle_intake::services::{RecordCodec, RecordError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("{}", "🚗 Vehicle Intake - Consola de operador".bright_blue().bold());
    println!("{}", "=======================================".bright_blue());
    println!();

    let base_url =
        std::env::var("INTAKE_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    // La sesión se resuelve una sola vez; sin ella no hay operaciones
    let client = match bootstrap_session(reqwest::Client::new(), &base_url).await {
        Ok(client) => client,
        Err(e) => {
            println!("{}", format!("❌ No se pudo iniciar la sesión: {}", e).bright_red().bold());
            std::process::exit(1);
        }
    };
    println!("{}", format!("✅ Sesión iniciada ({})", client.owner_id()).bright_green());

    let codec = RecordCodec::default();
    let mut state = ConsoleState::new();

    loop {
        if let Some(notice) = state.notice.take() {
            render_notice(&notice);
        }
        state = match state.view {
            View::Menu => {
                println!();
                println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
                println!("{}", "==================".bright_green());
                println!("1. 📷 Nueva entrada de vehículo");
                println!("2. 🔍 Buscar por matrícula");
                println!("3. 🚪 Salir");
                match prompt("Selecciona una opción (1-3): ")?.as_str() {
                    "1" => state.navigate(View::Intake),
                    "2" => state.navigate(View::Search),
                    "3" => {
                        println!("{}", "👋 ¡Hasta luego!".bright_green());
                        break;
                    }
                    _ => state.invalid_input("Opción inválida. Intenta de nuevo.".to_string()),
                }
            }
            View::Intake => intake_screen(state, &client, &codec).await?,
            View::Search => search_screen(state, &client).await?,
        };
    }

    Ok(())
}

async fn intake_screen(
    mut state: ConsoleState,
    client: &IntakeClient,
    codec: &RecordCodec,
) -> io::Result<ConsoleState> {
    println!();
    println!("{}", "📷 NUEVA ENTRADA".bright_cyan().bold());
    println!("{}", "================".bright_cyan());
    println!("Matrícula:  {}", state.draft.license_plate());
    println!("Empleado:   {}", state.draft.employee_name());
    println!("Contrato:   {}", state.draft.contract_number());
    println!(
        "Imágenes:   {} ({} bytes)",
        state.draft.images().len(),
        state.draft.total_image_bytes()
    );
    println!();
    println!("1. Matrícula  2. Empleado  3. Contrato");
    println!("4. Capturar imagen  5. Quitar imagen");
    println!("6. 💾 Guardar  7. ⬅️  Volver");

    let next = match prompt("Opción: ")?.as_str() {
        "1" => {
            state.draft.set_license_plate(prompt("Matrícula: ")?);
            state
        }
        "2" => {
            state.draft.set_employee_name(prompt("Empleado: ")?);
            state
        }
        "3" => {
            state.draft.set_contract_number(prompt("Nº de contrato: ")?);
            state
        }
        "4" => {
            let path = prompt("Ruta de la imagen: ")?;
            let mut camera = FileCamera::new(path);
            let captured = CameraSession::open(&mut camera).and_then(|mut session| {
                let frame = session.capture();
                session.close();
                frame
            });
            match captured {
                Ok(frame) => {
                    state.draft.add_image(frame.to_payload());
                    state
                }
                Err(e) => state.invalid_input(format!("No se pudo capturar: {}", e)),
            }
        }
        "5" => {
            let raw = prompt("Índice de la imagen (desde 1): ")?;
            let removed = raw
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|index| state.draft.remove_image(index));
            if removed.is_some() {
                state
            } else {
                state.invalid_input("Índice fuera de rango".to_string())
            }
        }
        "6" => save_draft(state, client, codec).await,
        "7" => state.navigate(View::Menu),
        _ => state.invalid_input("Opción inválida".to_string()),
    };

    Ok(next)
}

async fn save_draft(state: ConsoleState, client: &IntakeClient, codec: &RecordCodec) -> ConsoleState {
    // Validación local antes de enviar; el servidor vuelve a validar
    let validated = match codec.validate_for_save(state.draft.to_input()) {
        Ok(validated) => validated,
        Err(RecordError::MissingField { fields }) => {
            return state.invalid_input(format!("Completa los campos: {}", fields.join(", ")));
        }
    };

    let state = match state.begin_request() {
        Ok(state) => state,
        Err(state) => return state.invalid_input("Ya hay una operación en curso".to_string()),
    };

    let plate = validated.record.license_plate.clone();
    match client.save(&state.draft.to_input()).await {
        Ok(response) => state.save_succeeded(&plate, response.warning),
        Err(e) => state.request_failed(describe(&e)),
    }
}

async fn search_screen(state: ConsoleState, client: &IntakeClient) -> io::Result<ConsoleState> {
    println!();
    println!("{}", "🔍 BUSCAR REGISTRO".bright_cyan().bold());
    println!("{}", "==================".bright_cyan());

    let plate = prompt("Matrícula (vacío para volver): ")?;
    if plate.is_empty() {
        return Ok(state.navigate(View::Menu));
    }

    let state = match state.begin_request() {
        Ok(state) => state,
        Err(state) => return Ok(state.invalid_input("Ya hay una operación en curso".to_string())),
    };

    let next = match client.lookup(&plate).await {
        Ok(Some(record)) => {
            print_record(&record);
            state.lookup_finished(&record.record.license_plate, true)
        }
        Ok(None) => state.lookup_finished(&plate.to_uppercase(), false),
        Err(e) => state.request_failed(describe(&e)),
    };
    Ok(next)
}

fn print_record(stored: &StoredRecord) {
    let record = &stored.record;
    println!();
    println!("{}", "🚗 REGISTRO".bright_green().bold());
    println!("Matrícula:      {}", record.license_plate);
    println!("Nº de vehículo: {}", record.vehicle_number);
    println!("Empleado:       {}", record.employee_name);
    println!("Contrato:       {}", record.contract_number);
    println!("Imágenes:       {}", record.images.len());
    for (index, image) in record.images.iter().enumerate() {
        println!("  {}. {}", index + 1, image_summary(image));
    }
    println!("Creado:         {}", stored.created_at.to_rfc3339());
}

fn image_summary(payload: &str) -> String {
    match decode_data_url(payload) {
        Ok(image) => format!("{} ({} bytes)", image.mime, image.bytes.len()),
        Err(e) => format!("{} caracteres ({})", payload.len(), e),
    }
}

fn render_notice(notice: &Notice) {
    match notice {
        Notice::Info(msg) => println!("{}", format!("ℹ️  {}", msg).bright_green()),
        Notice::Warning(msg) => println!("{}", format!("⚠️  {}", msg).bright_yellow()),
        Notice::Error(msg) => println!("{}", format!("❌ {}", msg).bright_red()),
    }
}

fn describe(error: &ClientError) -> String {
    match error {
        ClientError::MissingField(fields) => format!("Completa los campos: {}", fields.join(", ")),
        other => other.to_string(),
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_intake::services::image_payload::encode_data_url;

    #[test]
    fn test_image_summary_reports_decoded_size() {
        let payload = encode_data_url("image/png", &[1, 2, 3, 4]);
        assert_eq!(image_summary(&payload), "image/png (4 bytes)");
    }

    #[test]
    fn test_image_summary_tolerates_opaque_strings() {
        assert!(image_summary("img1").starts_with("4 caracteres"));
    }
}
