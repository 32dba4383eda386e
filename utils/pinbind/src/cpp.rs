use std::fmt::Write;

use crate::code_writer::{CodeWriter, Error};
use crate::ir::{REGISTRY_PARAM, RegistryStyle, SetupFunction, Statement, TOP_PARAM, config_var};

/// Escapes `s` for use between the quotes of a C++ string literal.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Octal escapes stop after three digits, unlike `\x`.
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn render(func: &SetupFunction) -> Result<String, Error> {
    let mut w = CodeWriter::new(String::new());

    for include in &func.includes {
        w.append_line(&format!("#include \"{include}\""))?;
    }
    w.append_newline()?;

    let params = match func.registry {
        RegistryStyle::Singleton => format!("{}* {TOP_PARAM}", func.top_type),
        RegistryStyle::Parameter => format!(
            "{}* {TOP_PARAM}, cakeboard::CakeBoard& {REGISTRY_PARAM}",
            func.top_type
        ),
    };
    w.append_line(&format!("void {}({params}) {{", func.name))?;
    w.indent();
    for stmt in &func.body {
        render_statement(&mut w, stmt, func.registry)?;
    }
    w.unindent()?;
    w.append_line("}")?;

    Ok(w.into_inner())
}

fn render_statement(
    w: &mut CodeWriter<String>,
    stmt: &Statement,
    registry: RegistryStyle,
) -> Result<(), Error> {
    match stmt {
        Statement::DeclareConfig {
            device,
            config_type,
            rows,
            cols,
            signal_widths,
        } => {
            let widths = signal_widths
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            w.append_line(&format!("{config_type} {}{{", config_var(device)))?;
            w.indent();
            w.append_line(&format!(".rows = {rows},"))?;
            w.append_line(&format!(".cols = {cols},"))?;
            w.append_line(&format!(".signal_widths = {{{widths}}}"))?;
            w.unindent()?;
            w.append_line("};")?;
            w.append_newline()?;
        }
        Statement::MakeShared { device, class } => {
            w.append_line(&format!("auto {device} = std::make_shared<{class}>("))?;
            w.indent();
            w.append_line(&format!("\"{}\",", escape(device)))?;
            w.append_line(&format!("{});", config_var(device)))?;
            w.unindent()?;
            w.append_newline()?;
        }
        Statement::BindSignal {
            device,
            signal,
            port,
            width,
            slice,
        } => {
            let signal = escape(signal);
            match slice {
                None => {
                    w.append_line(&format!("// bind {signal} to {port}"))?;
                    w.append_line(&format!(
                        "{device}->bindSignal(\"{signal}\", &{TOP_PARAM}->{port}, {width});"
                    ))?;
                }
                Some(range) => {
                    let (high, low) = (range.high(), range.low());
                    w.append_line(&format!("// bind {signal}[{high}:{low}] to {port}"))?;
                    w.append_line(&format!(
                        "{device}->bindSignal(\"{signal}\", &{TOP_PARAM}->{port}, {width}, {low}, {high});"
                    ))?;
                }
            }
        }
        Statement::AddDevice { device } => {
            let registry = match registry {
                RegistryStyle::Singleton => "cakeboard::CakeBoard::getInstance()",
                RegistryStyle::Parameter => REGISTRY_PARAM,
            };
            w.append_line(&format!("{registry}.addDevice({device});"))?;
            w.append_newline()?;
        }
    }
    Ok(())
}
