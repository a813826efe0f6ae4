use crate::errors::Result;
use crate::output::json::{RouteReport, RoutesOutput};
use std::io::Write;

/// Write the derived route configuration as human-readable text.
pub fn write_routes_text<W: Write>(writer: &mut W, output: &RoutesOutput) -> Result<()> {
    let metadata = &output.metadata;
    writeln!(writer, "Route Configuration Report")?;
    writeln!(writer, "==========================")?;
    writeln!(writer)?;
    writeln!(writer, "Document:   {}", metadata.document.display())?;
    if let Some(title) = &metadata.title {
        writeln!(writer, "Title:      {title}")?;
    }
    writeln!(writer, "Version:    {}", metadata.version)?;
    writeln!(writer, "Routes:     {}", metadata.route_count)?;
    writeln!(writer, "Modules:    {}", metadata.module_count)?;
    writeln!(writer, "Query keys: {}", metadata.query_key_count)?;
    writeln!(writer)?;

    for module in &output.modules {
        writeln!(writer, "Module {} ({})", module.name, module.config.api_class_name)?;
        writeln!(writer, "{}", "-".repeat(module.name.len() + 7))?;
        writeln!(writer, "  instance:      {}", module.config.api_instance_name)?;
        writeln!(writer, "  query keys:    {}", module.config.query_key_object_name)?;
        writeln!(writer, "  mutation keys: {}", module.config.mutation_key_object_name)?;
        writeln!(writer, "  imports:       queries -> api {}", module.imports.queries_to_api)?;
        writeln!(writer, "                 api -> dto {}", module.imports.api_to_dto)?;
        writeln!(writer)?;

        for route in output.routes.iter().filter(|r| r.module == module.name) {
            write_route(writer, route)?;
        }
    }

    Ok(())
}

fn write_route<W: Write>(writer: &mut W, report: &RouteReport) -> Result<()> {
    let request = &report.route.request;
    let response = report
        .route
        .response
        .dto_name
        .as_deref()
        .unwrap_or("unknown");

    writeln!(
        writer,
        "  {} {}  [{}]",
        report.method.as_str().to_uppercase(),
        report.path,
        report.route_name.original
    )?;
    writeln!(
        writer,
        "    {}({}): Promise<{}>",
        request.function_name,
        request.parameters.signatures.all.join(", "),
        response
    )?;
    writeln!(writer, "    key:      {}", report.query.query.key_constant_function)?;
    writeln!(
        writer,
        "    hooks:    {}, {}, {}",
        report.query.query.hook_name,
        report.query.query.suspense_hook_name,
        report.query.mutation.hook_name
    )?;
    if let Some(expression) = &request.schema.expression {
        writeln!(writer, "    payload:  {expression}")?;
    }
    if let Some(expression) = &report.route.response.schema.expression {
        writeln!(writer, "    response: {expression}")?;
    }
    if !report.query.mutation.invalidate_query_key.is_empty() {
        writeln!(
            writer,
            "    invalidates: {}",
            report.query.mutation.invalidate_query_key.join(", ")
        )?;
    }
    for (label, duration) in [
        ("staleTime", &report.query.stale_time),
        ("gcTime", &report.query.gc_time),
    ] {
        if let Some(duration) = duration {
            match &duration.comment {
                Some(comment) => writeln!(
                    writer,
                    "    {label}: {} // {comment}",
                    duration.expression
                )?,
                None => writeln!(writer, "    {label}: {}", duration.expression)?,
            }
        }
    }
    writeln!(writer)?;
    Ok(())
}
