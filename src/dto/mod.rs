pub mod api_response;
pub mod contact_dto;
pub mod quote_dto;
