use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub department_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::DepartmentId"
    )]
    Department,
    #[sea_orm(has_many = "super::employee_customer::Entity")]
    EmployeeCustomer,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::employee_customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeCustomer.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_customer::Relation::Customer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_customer::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
