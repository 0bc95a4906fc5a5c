//! End-to-end pipeline tests: render plan + mocked swagger download in,
//! generated files out.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A small but representative swagger document: two categories, a body
/// parameter, paging options, an enum, and a pagination wrapper schema.
fn swagger_fixture() -> serde_json::Value {
    json!({
        "swagger": "2.0",
        "info": { "title": "Tax Service", "version": "2.17.0" },
        "basePath": "/",
        "x-avalara-version": "17.5.0-67",
        "paths": {
            "/api/v2/accounts/{id}": {
                "get": {
                    "tags": ["Accounts"],
                    "summary": "Retrieve a single account",
                    "operationId": "GetAccount",
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "type": "integer", "format": "int32" },
                        { "name": "$include", "in": "query", "type": "string" }
                    ],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/AccountModel" } }
                    }
                },
                "put": {
                    "tags": ["Accounts"],
                    "summary": "Update a single account",
                    "operationId": "UpdateAccount",
                    "parameters": [
                        { "name": "account", "in": "body", "schema": { "$ref": "#/definitions/AccountModel" } },
                        { "name": "id", "in": "path", "required": true, "type": "integer", "format": "int32" }
                    ],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/AccountModel" } }
                    }
                }
            },
            "/api/v2/accounts": {
                "get": {
                    "tags": ["Accounts"],
                    "summary": "List all accounts",
                    "operationId": "QueryAccounts",
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/FetchResult[AccountModel]" } }
                    }
                }
            },
            "/api/v2/ping": {
                "get": {
                    "tags": ["Utilities"],
                    "summary": "Test connectivity",
                    "operationId": "Ping",
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/PingResultModel" } }
                    }
                }
            }
        },
        "definitions": {
            "AccountModel": {
                "description": "An account",
                "type": "object",
                "required": ["name"],
                "properties": {
                    "id": { "type": "integer", "format": "int32" },
                    "name": { "type": "string" },
                    "accountStatusId": {
                        "type": "string",
                        "x-enum-type": "AccountStatusId",
                        "enum": ["Inactive", "Active", "Test", "New"]
                    }
                }
            },
            "FetchResult[AccountModel]": {
                "description": "Paged account results",
                "type": "object",
                "properties": {
                    "count": { "type": "integer", "format": "int32" },
                    "value": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/AccountModel" }
                    }
                }
            },
            "PingResultModel": {
                "description": "Ping result",
                "type": "object",
                "properties": {
                    "authenticated": { "type": "boolean" },
                    "version": { "type": "string" }
                }
            }
        }
    })
}

/// Write the test templates and render plan into `dir`, pointing at
/// `swagger_uri`, with output rooted at `out_root`.
fn write_plan(dir: &Path, swagger_uri: &str, out_root: &Path) -> std::path::PathBuf {
    let templates = dir.join("templates");
    fs::create_dir_all(&templates).unwrap();

    fs::write(
        templates.join("category_class.tera"),
        "// {{ category }} client\n{% for m in api.methods %}{{ m.name }}\n{% endfor %}",
    )
    .unwrap();
    fs::write(
        templates.join("api_class.tera"),
        "{% for m in api.methods %}{{ m.response_type_name }} {{ m.name }}({% for p in m.parameters %}{{ p.type_name }} {{ p.clean_name }}{% if not loop.last %}, {% endif %}{% endfor %});\n{% endfor %}",
    )
    .unwrap();
    fs::write(
        templates.join("model_class.tera"),
        "class {{ model.schema_name }} {\n{% for p in model.properties %}    {{ p.type_name }} {{ p.name }};\n{% endfor %}}\n",
    )
    .unwrap();
    fs::write(
        templates.join("enum_class.tera"),
        "enum {{ enum_type.name }} { {% for i in enum_type.items %}{{ i.value }}{% if not loop.last %}, {% endif %}{% endfor %} }\n",
    )
    .unwrap();
    fs::write(
        out_root.join("AssemblyInfo.cs"),
        "[assembly: AssemblyVersion(\"0.0.0.0\")]",
    )
    .unwrap();

    let plan = json!({
        "swaggerUri": swagger_uri,
        "targets": [
            {
                "name": "csharp",
                "rootFolder": out_root,
                "templates": [
                    { "file": "templates/category_class.tera", "type": "methodCategories", "output": "src/{category}Client.cs" },
                    { "file": "templates/api_class.tera", "type": "singleFile", "output": "src/ApiClient.cs" },
                    { "file": "templates/model_class.tera", "type": "uniqueModels", "output": "src/models/{model}.cs" },
                    { "file": "templates/enum_class.tera", "type": "enums", "output": "src/enums/{enumDataType}.cs" }
                ],
                "fixups": [
                    {
                        "file": "AssemblyInfo.cs",
                        "encoding": "UTF8",
                        "regex": "AssemblyVersion\\(\"[0-9.]+\"\\)",
                        "replacement": "AssemblyVersion(\"{api_version_dotted}\")"
                    }
                ]
            }
        ]
    });
    let plan_path = dir.join("render.json");
    fs::write(&plan_path, serde_json::to_string_pretty(&plan).unwrap()).unwrap();
    plan_path
}

async fn mock_swagger_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/swagger.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(swagger_fixture()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_full_pipeline_renders_all_targets() {
    let server = mock_swagger_server().await;
    let work_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let plan_path = write_plan(
        work_dir.path(),
        &format!("{}/swagger.json", server.uri()),
        out_dir.path(),
    );

    sdkgen::pipeline::run(&plan_path).await.unwrap();

    // One file per category
    let accounts = fs::read_to_string(out_dir.path().join("src/AccountsClient.cs")).unwrap();
    assert!(accounts.contains("GetAccount"));
    assert!(accounts.contains("QueryAccounts"));
    assert!(accounts.contains("UpdateAccount"));
    assert!(!accounts.contains("Ping"));

    let utilities = fs::read_to_string(out_dir.path().join("src/UtilitiesClient.cs")).unwrap();
    assert!(utilities.contains("Ping"));
    assert!(!utilities.contains("GetAccount"));

    // The single combined file renders after the category pass and still
    // sees the complete, unfiltered method list
    let api = fs::read_to_string(out_dir.path().join("src/ApiClient.cs")).unwrap();
    for name in ["GetAccount", "QueryAccounts", "UpdateAccount", "Ping"] {
        assert!(api.contains(name), "missing {name} in combined file");
    }

    // Parameter rendering: body param last, renamed `model`; `$` stripped
    assert!(api.contains("AccountModel UpdateAccount(Int32 id, AccountModel model);"));
    assert!(api.contains("AccountModel GetAccount(Int32 id, String include);"));
    assert!(api.contains("FetchResult<AccountModel> QueryAccounts();"));

    // One file per model, pagination wrappers excluded
    assert!(out_dir.path().join("src/models/AccountModel.cs").exists());
    assert!(out_dir.path().join("src/models/PingResultModel.cs").exists());
    assert!(
        !out_dir
            .path()
            .join("src/models/FetchResult[AccountModel].cs")
            .exists()
    );

    let account_model =
        fs::read_to_string(out_dir.path().join("src/models/AccountModel.cs")).unwrap();
    assert!(account_model.contains("Int32? id;"));
    // Required via the schema-level list
    assert!(account_model.contains("String name;"));
    assert!(account_model.contains("AccountStatusId? accountStatusId;"));

    // One file per enum
    let status = fs::read_to_string(out_dir.path().join("src/enums/AccountStatusId.cs")).unwrap();
    assert_eq!(status, "enum AccountStatusId { Inactive, Active, Test, New }\n");

    // Fixup injected the dash-normalized version
    let assembly_info = fs::read_to_string(out_dir.path().join("AssemblyInfo.cs")).unwrap();
    assert_eq!(
        assembly_info,
        "[assembly: AssemblyVersion(\"17.5.0.67\")]"
    );
}

#[tokio::test]
async fn test_download_failure_aborts_before_rendering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/swagger.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let work_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let plan_path = write_plan(
        work_dir.path(),
        &format!("{}/swagger.json", server.uri()),
        out_dir.path(),
    );

    let result = sdkgen::pipeline::run(&plan_path).await;
    assert!(result.is_err());

    // No partial output was written
    assert!(!out_dir.path().join("src").exists());
}

#[tokio::test]
async fn test_malformed_plan_fails_without_network() {
    let work_dir = TempDir::new().unwrap();
    let plan_path = work_dir.path().join("render.json");
    fs::write(&plan_path, "{ not json").unwrap();

    let result = sdkgen::pipeline::run(&plan_path).await;
    match result.unwrap_err() {
        sdkgen::Error::Plan(msg) => assert!(msg.contains("Failed to parse render plan")),
        other => panic!("Expected Plan error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_broken_template_fails_before_fetch() {
    // The swagger URI points nowhere; template compilation must fail first
    let work_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let templates = work_dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("broken.tera"),
        "{% for m in api.methods %}{{ m.name }}",
    )
    .unwrap();

    let plan = json!({
        "swaggerUri": "http://127.0.0.1:1/unreachable.json",
        "targets": [
            {
                "name": "csharp",
                "rootFolder": out_dir.path(),
                "templates": [
                    { "file": "templates/broken.tera", "type": "singleFile", "output": "out.cs" }
                ]
            }
        ]
    });
    let plan_path = work_dir.path().join("render.json");
    fs::write(&plan_path, serde_json::to_string(&plan).unwrap()).unwrap();

    match sdkgen::pipeline::run(&plan_path).await.unwrap_err() {
        sdkgen::Error::TemplateCompile { file, .. } => {
            assert!(file.contains("broken.tera"));
        }
        other => panic!("Expected TemplateCompile error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_parameter_location_renders_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/swagger.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "swagger": "2.0",
            "info": { "title": "Bad API", "version": "1.0" },
            "paths": {
                "/api/v2/session": {
                    "get": {
                        "tags": ["Sessions"],
                        "operationId": "GetSession",
                        "parameters": [
                            { "name": "session", "in": "cookie", "type": "string" }
                        ],
                        "responses": {}
                    }
                }
            },
            "definitions": {}
        })))
        .mount(&server)
        .await;

    let work_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let plan_path = write_plan(
        work_dir.path(),
        &format!("{}/swagger.json", server.uri()),
        out_dir.path(),
    );

    match sdkgen::pipeline::run(&plan_path).await.unwrap_err() {
        sdkgen::Error::UnknownParameterLocation { location, name } => {
            assert_eq!(location, "cookie");
            assert_eq!(name, "session");
        }
        other => panic!("Expected UnknownParameterLocation, got {other:?}"),
    }

    // The build aborted before any target rendered
    assert!(!out_dir.path().join("src").exists());
}
