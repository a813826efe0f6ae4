use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn routes_json(extra: &[&str]) -> Value {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = fixture_path("petstore.yaml");
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", fixture.to_str().unwrap()])
        .args(["--path", tmp.path().to_str().unwrap()])
        .args(extra);
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn find_route<'a>(report: &'a Value, method: &str, path: &str) -> &'a Value {
    report["routes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["method"] == method && r["path"] == path)
        .unwrap_or_else(|| panic!("no route {method} {path}"))
}

#[test]
fn routes_json_metadata() {
    let report = routes_json(&[]);
    let metadata = &report["metadata"];
    assert_eq!(metadata["title"], "Petstore");
    assert_eq!(metadata["version"], "3.0.3");
    assert_eq!(metadata["routeCount"], 6);
    assert_eq!(metadata["moduleCount"], 2);
    assert_eq!(metadata["queryKeyCount"], 2);
    assert_eq!(metadata["createSchema"], true);
}

#[test]
fn list_route_request_and_hooks() {
    let report = routes_json(&[]);
    let list = find_route(&report, "get", "/api/pets");

    assert_eq!(list["routeName"]["original"], "listPets");
    assert_eq!(list["routeName"]["usage"], "getApiPets");
    let request = &list["route"]["request"];
    assert_eq!(request["functionName"], "getApiPets");
    assert_eq!(request["query"]["dtoName"], "ListPetsQueryParams");
    assert_eq!(
        request["parameters"]["signatures"]["all"],
        serde_json::json!([
            "params?: ListPetsQueryParams",
            "kyInstance?: KyInstance",
            "options?: Options"
        ])
    );
    assert_eq!(list["route"]["response"]["dtoName"], "PetDto[]");
    assert_eq!(
        list["route"]["response"]["schema"]["expression"],
        "z.array(petDtoSchema)"
    );

    let query = &list["query"];
    assert_eq!(query["query"]["keyConstantName"], "GET_PETS");
    assert_eq!(
        query["query"]["keyConstantFunction"],
        "(params?: ListPetsQueryParams)=>['pets', params]"
    );
    assert_eq!(query["query"]["hookName"], "useGetApiPetsQuery");
    assert_eq!(query["mutation"]["keyConstantContent"], "['api', 'pets']");
    assert_eq!(
        query["staleTime"]["expression"],
        "1 * 60 * 60 * 1000 + 30 * 60 * 1000"
    );
    assert_eq!(query["staleTime"]["comment"], "1 hour 30 minutes");
    assert_eq!(query["gcTime"]["expression"], "Infinity");
}

#[test]
fn mutations_resolve_invalidations() {
    let report = routes_json(&[]);

    let create = find_route(&report, "post", "/api/pets");
    assert_eq!(
        create["query"]["mutation"]["invalidateQueryKey"],
        serde_json::json!(["GET_PETS(params)"])
    );

    let update = find_route(&report, "put", "/api/pets/{petId}");
    assert_eq!(
        update["query"]["mutation"]["invalidateQueryKey"],
        serde_json::json!(["GET_PETS_PETID(variables.petId)", "GET_PETS()"])
    );
    let request = &update["route"]["request"];
    assert_eq!(request["headers"]["dtoName"], "PutApiPetsPetIdHeaders");
    assert_eq!(
        request["options"]["typeExpr"],
        "Omit<Options, 'headers'> & { headers: PutApiPetsPetIdHeaders }"
    );
    assert_eq!(
        request["schema"]["expression"],
        "match(payload).with({ kind: \"cat\" }, () => catDtoSchema).with({ kind: \"dog\" }, () => dogDtoSchema).otherwise(()=>null)"
    );
    assert_eq!(
        request["schema"]["list"],
        serde_json::json!(["catDtoSchema", "dogDtoSchema"])
    );
}

#[test]
fn void_response_and_ignored_duration() {
    let report = routes_json(&[]);
    let delete = find_route(&report, "delete", "/api/pets/{petId}");
    assert_eq!(delete["route"]["response"]["dtoName"], "void");
    assert_eq!(delete["route"]["response"]["schema"]["expression"], Value::Null);
    assert!(delete["query"].get("gcTime").is_none());
}

#[test]
fn modules_carry_paths_and_imports() {
    let report = routes_json(&[]);
    let modules = report["modules"].as_array().unwrap();
    let names: Vec<&str> = modules.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["pets", "store"]);

    let pets = &modules[0];
    assert_eq!(pets["apiClassName"], "PetsApi");
    assert_eq!(pets["queryKeyObjectName"], "PETS_QUERY_KEY");
    assert_eq!(pets["paths"]["api"]["relativePath"], "src/entities/pets/api/index.ts");
    assert_eq!(pets["paths"]["api"]["alias"], "@/entities/pets/api/index");
    assert_eq!(pets["imports"]["queriesToApi"], "./index");
    assert_eq!(pets["imports"]["apiToDto"], "@/shared/api/dto");
}

#[test]
fn module_filter_and_no_schema() {
    let report = routes_json(&["--module", "store", "--no-schema"]);
    assert_eq!(report["metadata"]["routeCount"], 1);
    assert_eq!(report["metadata"]["createSchema"], false);
    let inventory = find_route(&report, "get", "/api/stores/{storeId}/inventory");
    assert_eq!(
        inventory["route"]["request"]["pathParams"]["signatures"],
        serde_json::json!(["storeId:number"])
    );
    assert_eq!(inventory["route"]["response"]["dtoName"], "Record<string, number>");
    assert_eq!(inventory["route"]["response"]["schema"]["list"], serde_json::json!([]));
}

#[test]
fn routes_text_format() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = fixture_path("petstore.yaml");
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", fixture.to_str().unwrap(), "--format", "text"])
        .args(["--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route Configuration Report"))
        .stdout(predicate::str::contains("Module pets (PetsApi)"))
        .stdout(predicate::str::contains("GET /api/pets  [listPets]"))
        .stdout(predicate::str::contains(
            "getApiPets(params?: ListPetsQueryParams, kyInstance?: KyInstance, options?: Options): Promise<PetDto[]>",
        ))
        .stdout(predicate::str::contains("staleTime: 1 * 60 * 60 * 1000 + 30 * 60 * 1000 // 1 hour 30 minutes"))
        .stdout(predicate::str::contains("invalidates: GET_PETS(params)"));
}

#[test]
fn format_from_env_var() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = fixture_path("petstore.yaml");
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", fixture.to_str().unwrap()])
        .args(["--path", tmp.path().to_str().unwrap()])
        .env("SWAGGER_AUTOGEN_FORMAT", "text");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route Configuration Report"));
}

#[test]
fn document_from_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::copy(fixture_path("petstore.yaml"), tmp.path().join("api.yaml")).unwrap();
    std::fs::write(
        tmp.path().join("swagger-autogen.toml"),
        r#"
[source]
uri = "api.yaml"

[paths]
api = "app/{moduleName}/client.ts"
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"relativePath\": \"app/pets/client.ts\""))
        .stdout(predicate::str::contains("\"alias\": \"app/pets/client\""));
}

#[test]
fn missing_document_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", "--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No API description document"));
}

#[test]
fn remote_document_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", "https://example.com/openapi.json"])
        .args(["--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Remote documents are not supported"));
}

#[test]
fn malformed_document_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = tmp.path().join("broken.yaml");
    std::fs::write(&doc, "info:\n  title: no version\n").unwrap();
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.args(["routes", doc.to_str().unwrap()])
        .args(["--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API description"));
}

#[test]
fn dropped_extensions_warn_without_rust_log() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = fixture_path("petstore.yaml");
    let mut cmd = Command::cargo_bin("swagger-autogen").unwrap();
    cmd.env_remove("RUST_LOG")
        .args(["routes", fixture.to_str().unwrap()])
        .args(["--path", tmp.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "x-invalidate-query-key 'UNKNOWN_KEY' does not match any GET route's x-query-key",
        ))
        .stderr(predicate::str::contains("ignoring x-gcTime value"));
}
