//! Column aliases of the legacy schema, Portuguese name first.
use school_migrator_shared::Field;

// Shared by several tables
pub const NAME: Field = Field::new(&["nome", "name"]);
pub const CODE: Field = Field::new(&["codigo", "code"]);
pub const DESCRIPTION: Field = Field::new(&["descricao", "description"]);
pub const ADDRESS: Field = Field::new(&["endereco", "address"]);
pub const CITY: Field = Field::new(&["cidade", "city"]);
pub const STATE: Field = Field::new(&["estado", "uf", "state"]);
pub const ZIP_CODE: Field = Field::new(&["cep", "zip_code"]);
pub const PHONE: Field = Field::new(&["telefone", "phone"]);
pub const EMAIL: Field = Field::new(&["email", "e_mail"]);
pub const STATUS: Field = Field::new(&["situacao", "status"]);
pub const ACTIVE: Field = Field::new(&["ativo", "is_active", "active"]);
pub const TYPE: Field = Field::new(&["tipo", "type"]);
pub const TAGS: Field = Field::new(&["tags", "etiquetas"]);
pub const CREATED_AT: Field = Field::new(&["criado_em", "data_criacao", "created_at"]);
pub const UPDATED_AT: Field = Field::new(&["atualizado_em", "data_atualizacao", "updated_at"]);

// Users
pub const PASSWORD: Field = Field::new(&["senha", "password"]);
pub const CPF: Field = Field::new(&["cpf"]);
pub const BIRTH_DATE: Field = Field::new(&["data_nascimento", "birth_date"]);

// Files
pub const ORIGINAL_NAME: Field = Field::new(&["nome_original", "original_name"]);
pub const FILE_TYPE: Field = Field::new(&["tipo", "mime_type", "type"]);
pub const SIZE: Field = Field::new(&["tamanho", "size"]);
pub const SIZE_FORMATTED: Field = Field::new(&["tamanho_formatado", "size_formatted"]);
pub const BUCKET: Field = Field::new(&["bucket"]);
pub const S3_KEY: Field = Field::new(&["chave_s3", "s3_key"]);
pub const S3_URL: Field = Field::new(&["url_s3", "url", "s3_url"]);
pub const CATEGORY: Field = Field::new(&["categoria", "category"]);
pub const METADATA: Field = Field::new(&["metadados", "metadata"]);

// Collections
pub const IS_PUBLIC: Field = Field::new(&["publico", "publica", "is_public"]);
pub const ITEMS_COUNT: Field = Field::new(&["quantidade_itens", "total_itens", "items_count"]);
