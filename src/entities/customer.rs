use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rating: i32,
    pub company_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::CompanyId"
    )]
    Company,
    #[sea_orm(has_many = "super::employee_customer::Entity")]
    EmployeeCustomer,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::employee_customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeCustomer.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

// Customer <-> Employee through the junction table
impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_customer::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_customer::Relation::Customer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
